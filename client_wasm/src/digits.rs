//! Seven-segment score digits built from bars

/// Segments a..g: top, top-right, bottom-right, bottom, bottom-left,
/// top-left, middle
const SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],
    [false, true, true, false, false, false, false],
    [true, true, false, true, true, false, true],
    [true, true, true, true, false, false, true],
    [false, true, true, false, false, true, true],
    [true, false, true, true, false, true, true],
    [true, false, true, true, true, true, true],
    [true, true, true, false, false, false, false],
    [true, true, true, true, true, true, true],
    [true, true, true, true, false, true, true],
];

/// Axis-aligned bar, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitStyle {
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    pub spacing: f32,
}

impl Default for DigitStyle {
    fn default() -> Self {
        Self {
            width: 26.0,
            height: 46.0,
            thickness: 6.0,
            spacing: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `x` is the left edge of the number
    Left,
    /// `x` is the right edge of the number
    Right,
}

pub fn digit_bars(digit: u8, x: f32, y: f32, style: &DigitStyle) -> Vec<Bar> {
    let DigitStyle {
        width: w,
        height: h,
        thickness: t,
        ..
    } = *style;
    let half = h / 2.0;
    let bars = [
        Bar { x, y, w, h: t },
        Bar { x: x + w - t, y, w: t, h: half },
        Bar { x: x + w - t, y: y + half, w: t, h: half },
        Bar { x, y: y + h - t, w, h: t },
        Bar { x, y: y + half, w: t, h: half },
        Bar { x, y, w: t, h: half },
        Bar { x, y: y + half - t / 2.0, w, h: t },
    ];
    let lit = SEGMENTS[(digit % 10) as usize];
    bars.into_iter()
        .zip(lit)
        .filter_map(|(bar, on)| on.then_some(bar))
        .collect()
}

fn decimal_digits(value: u32) -> Vec<u8> {
    value.to_string().bytes().map(|b| b - b'0').collect()
}

pub fn number_width(value: u32, style: &DigitStyle) -> f32 {
    let n = decimal_digits(value).len() as f32;
    n * style.width + (n - 1.0) * style.spacing
}

pub fn number_bars(value: u32, x: f32, y: f32, align: Align, style: &DigitStyle) -> Vec<Bar> {
    let left = match align {
        Align::Left => x,
        Align::Right => x - number_width(value, style),
    };
    decimal_digits(value)
        .into_iter()
        .enumerate()
        .flat_map(|(i, digit)| {
            let dx = left + i as f32 * (style.width + style.spacing);
            digit_bars(digit, dx, y, style)
        })
        .collect()
}
