use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

use crate::config::RequestRecipe;

use super::palette::method_color;

const BANNER_LINES: [&str; 2] = ["█▀█ █ █ █   █▀ █▀▀", "█▀▀ █▄█ █▄▄ ▄█ ██▄"];

const COLOR_START: (u8, u8, u8) = (0xff, 0x5f, 0x87);
const COLOR_END: (u8, u8, u8) = (0x3a, 0xa9, 0xff);

/// Prints the program banner and the `METHOD => url` header to stdout.
pub(crate) fn print_run_header(recipe: &RequestRecipe) {
    let use_color = std::io::stdout().is_terminal();
    let denom = BANNER_LINES.len().saturating_sub(1);
    for (idx, line) in BANNER_LINES.iter().enumerate() {
        if use_color {
            let (r, g, b) = gradient_rgb(COLOR_START, COLOR_END, idx, denom);
            println!("{}", line.with(Color::Rgb { r, g, b }));
        } else {
            println!("{line}");
        }
    }
    println!(
        "pulse v{} | {} | http request tester",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE")
    );
    println!();

    let method = recipe.method.as_str();
    if use_color {
        println!(
            "{} => {}",
            method.with(method_color(&recipe.method)),
            recipe.url
        );
    } else {
        println!("{method} => {}", recipe.url);
    }
}

fn gradient_rgb(start: (u8, u8, u8), end: (u8, u8, u8), idx: usize, denom: usize) -> (u8, u8, u8) {
    let denom = i32::try_from(denom.max(1)).unwrap_or(1);
    let idx = i32::try_from(idx).unwrap_or(denom).min(denom);
    let lerp = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let value = i32::from(b)
            .checked_sub(a)
            .and_then(|delta| delta.checked_mul(idx))
            .and_then(|scaled| scaled.checked_div(denom))
            .and_then(|step| a.checked_add(step))
            .unwrap_or(a);
        u8::try_from(value.clamp(0, 255)).unwrap_or(0)
    };
    (
        lerp(start.0, end.0),
        lerp(start.1, end.1),
        lerp(start.2, end.2),
    )
}
