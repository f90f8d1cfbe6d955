//! Display properties of the terminal the dashboard runs in.

/// Screen and viewport readings taken from the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Window width in pixels, when the terminal reports it.
    pub screen_width: Option<u32>,
    /// Window height in pixels, when the terminal reports it.
    pub screen_height: Option<u32>,
    /// Columns.
    pub viewport_width: Option<u16>,
    /// Rows.
    pub viewport_height: Option<u16>,
    /// Bits per color: 24, 8 or 4.
    pub color_depth: Option<u8>,
}

/// Reads the current window size and color depth.
pub fn read_display() -> DisplayInfo {
    let mut info = DisplayInfo {
        color_depth: color_depth_from_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        ),
        ..DisplayInfo::default()
    };

    match crossterm::terminal::window_size() {
        Ok(size) => {
            info.viewport_width = nonzero(size.columns);
            info.viewport_height = nonzero(size.rows);
            info.screen_width = nonzero(size.width).map(u32::from);
            info.screen_height = nonzero(size.height).map(u32::from);
        }
        Err(e) => {
            tracing::debug!("window_size unavailable: {}", e);
            if let Ok((columns, rows)) = crossterm::terminal::size() {
                info.viewport_width = nonzero(columns);
                info.viewport_height = nonzero(rows);
            }
        }
    }
    info
}

fn nonzero(v: u16) -> Option<u16> {
    (v > 0).then_some(v)
}

/// Color depth implied by `COLORTERM` and `TERM`.
///
/// `None` when no terminal type is known at all (or it is `dumb`).
pub fn color_depth_from_env(colorterm: Option<&str>, term: Option<&str>) -> Option<u8> {
    let colorterm = colorterm.unwrap_or_default().to_ascii_lowercase();
    let term = term.unwrap_or_default().to_ascii_lowercase();

    let truecolor = |s: &str| s.contains("truecolor") || s.contains("24bit") || s.contains("direct");
    if truecolor(&colorterm) || truecolor(&term) {
        return Some(24);
    }
    if term.contains("256color") {
        return Some(8);
    }
    if term.is_empty() || term == "dumb" {
        return None;
    }
    Some(4)
}
