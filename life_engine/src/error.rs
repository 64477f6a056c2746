use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("a {width}x{height} grid with wall thickness {wall_thickness} has no interior")]
    NoInterior {
        width: usize,
        height: usize,
        wall_thickness: usize,
    },

    #[error("a {width}x{height} grid with wall thickness {wall_thickness} is too large to allocate")]
    GridTooLarge {
        width: usize,
        height: usize,
        wall_thickness: usize,
    },

    #[error("wall thickness must be at least 1")]
    WallTooThin,

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error(
        "pattern is {pattern_width}x{pattern_height} but the board is only {board_width}x{board_height}"
    )]
    PatternTooLarge {
        pattern_width: usize,
        pattern_height: usize,
        board_width: usize,
        board_height: usize,
    },

    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
