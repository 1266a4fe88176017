use crossterm::style::Color;

/// A run of text printed in one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    pub(crate) text: String,
    pub(crate) color: Option<Color>,
}

impl Segment {
    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub(crate) fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

/// Concatenates the text of a line, dropping colors.
pub(crate) fn plain_text(line: &[Segment]) -> String {
    line.iter().map(|segment| segment.text.as_str()).collect()
}

/// Color for a success-rate percentage.
#[must_use]
pub const fn percentage_color(percentage: f64) -> Color {
    if percentage >= 75.0 {
        Color::Green
    } else if percentage >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Color for an HTTP status code; 0 and out-of-range codes are magenta.
#[must_use]
pub const fn status_color(status_code: u16) -> Color {
    match status_code {
        0..=99 => Color::Magenta,
        100..=199 => Color::White,
        200..=299 => Color::Green,
        300..=399 => Color::Yellow,
        400..=599 => Color::Red,
        _ => Color::Magenta,
    }
}

#[must_use]
pub fn method_color(method: &reqwest::Method) -> Color {
    match method.as_str() {
        "GET" => Color::Green,
        "DELETE" => Color::Red,
        "POST" => Color::Magenta,
        _ => Color::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_thresholds() -> Result<(), String> {
        if percentage_color(75.0) != Color::Green || percentage_color(100.0) != Color::Green {
            return Err("Expected green at 75% and above".to_owned());
        }
        if percentage_color(50.0) != Color::Yellow || percentage_color(74.99) != Color::Yellow {
            return Err("Expected yellow between 50% and 75%".to_owned());
        }
        if percentage_color(49.99) != Color::Red || percentage_color(0.0) != Color::Red {
            return Err("Expected red below 50%".to_owned());
        }
        Ok(())
    }

    #[test]
    fn status_code_bands() -> Result<(), String> {
        let cases = [
            (0, Color::Magenta),
            (101, Color::White),
            (204, Color::Green),
            (302, Color::Yellow),
            (404, Color::Red),
            (503, Color::Red),
            (600, Color::Magenta),
        ];
        for (code, expected) in cases {
            if status_color(code) != expected {
                return Err(format!("Unexpected color for {}", code));
            }
        }
        Ok(())
    }
}
