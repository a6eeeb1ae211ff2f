use std::io;
use std::path::Path;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};

use crate::backtracking_search::Assignment;
use crate::errors::{CrosswordError, Result};
use crate::grid_config::Crossword;
use crate::word_list::Vocabulary;

/// Character used for blocked cells in `render_grid`.
pub const BLOCK: char = '█';

/// Side of one grid cell in a drawn image, in pixels.
pub const CELL_SIZE: u32 = 100;
const CELL_BORDER: u32 = 2;
const INTERIOR_SIZE: u32 = CELL_SIZE - 2 * CELL_BORDER;

/// Each 8x8 glyph pixel becomes a square this many pixels wide.
const GLYPH_SCALE: u32 = 8;
const GLYPH_SIZE: u32 = 8 * GLYPH_SCALE;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Return a 2D array of the letters placed by `assignment`, indexed by row then column. Blocked
/// cells and cells no assigned word passes through are `None`.
pub fn letter_grid(
    crossword: &Crossword,
    vocabulary: &Vocabulary,
    assignment: &Assignment,
) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width()]; crossword.height()];

    for choice in assignment.iter() {
        let variable = crossword.variable(choice.variable_id);
        let word = vocabulary.word(choice.word_id);

        for ((row, column), &letter) in variable.cell_coords().zip(&word.chars) {
            letters[row][column] = Some(letter);
        }
    }

    letters
}

/// Turn a letter grid into a rendered string, one line per row.
pub fn render_grid(crossword: &Crossword, letters: &[Vec<Option<char>>]) -> String {
    (0..crossword.height()).map(|row| {
        (0..crossword.width()).map(|column| {
            if crossword.structure.is_fillable((row, column)) {
                letters.get(row).and_then(|cells| cells.get(column).copied().flatten()).unwrap_or(' ')
            } else {
                BLOCK
            }
        }).collect::<String>()
    }).collect::<Vec<_>>().join("\n")
}

fn fill_square(image: &mut RgbaImage, left: u32, top: u32, size: u32, color: Rgba<u8>) {
    for y in top..top + size {
        for x in left..left + size {
            image.put_pixel(x, y, color);
        }
    }
}

fn draw_letter(image: &mut RgbaImage, left: u32, top: u32, letter: char) {
    let Some(glyph) = BASIC_FONTS.get(letter) else {
        log::debug!("no glyph for {:?}, leaving its cell blank", letter);
        return;
    };

    // Bit 0 of each row byte is the leftmost pixel.
    for (glyph_row, bits) in (0..).zip(glyph) {
        for glyph_column in 0..8 {
            if bits & (1 << glyph_column) != 0 {
                fill_square(
                    image,
                    left + glyph_column * GLYPH_SCALE,
                    top + glyph_row * GLYPH_SCALE,
                    GLYPH_SCALE,
                    BLACK,
                );
            }
        }
    }
}

/// Draw a letter grid as an image: black background, a white square inside each fillable cell and
/// each placed letter centred in black.
pub fn draw_grid(crossword: &Crossword, letters: &[Vec<Option<char>>]) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(
        crossword.width() as u32 * CELL_SIZE,
        crossword.height() as u32 * CELL_SIZE,
        BLACK,
    );

    for row in 0..crossword.height() {
        for column in 0..crossword.width() {
            if !crossword.structure.is_fillable((row, column)) {
                continue;
            }

            let left = column as u32 * CELL_SIZE + CELL_BORDER;
            let top = row as u32 * CELL_SIZE + CELL_BORDER;
            fill_square(&mut image, left, top, INTERIOR_SIZE, WHITE);

            if let Some(letter) = letters.get(row).and_then(|cells| cells.get(column).copied().flatten()) {
                let margin = (INTERIOR_SIZE - GLYPH_SIZE) / 2;
                draw_letter(&mut image, left + margin, top + margin, letter);
            }
        }
    }

    image
}

/// Draw the grid with `draw_grid` and save it to `path` as a PNG.
pub fn save_image<P: AsRef<Path>>(
    crossword: &Crossword,
    letters: &[Vec<Option<char>>],
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    draw_grid(crossword, letters)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| CrosswordError::Write {
            path: path.to_path_buf(),
            source: match err {
                ImageError::IoError(source) => source,
                other => io::Error::new(io::ErrorKind::Other, other),
            },
        })
}
