//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use pagecraft_core::items::ItemKind;
use pagecraft_core::selection::ResizeDir;
use std::path::PathBuf;

/// Pagecraft - build pages from positioned components
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the saved page (defaults to the user data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Canvas width in pixels, used to clamp moves and resizes
    #[arg(long, global = true, default_value_t = 1280.0)]
    pub width: f64,

    /// Canvas height in pixels, used to clamp moves and resizes
    #[arg(long, global = true, default_value_t = 800.0)]
    pub height: f64,

    /// Client x of the canvas's top-left corner, for drop coordinates
    #[arg(long, global = true, default_value_t = 0.0)]
    pub origin_x: f64,

    /// Client y of the canvas's top-left corner, for drop coordinates
    #[arg(long, global = true, default_value_t = 0.0)]
    pub origin_y: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List items and canvas settings
    Show {
        /// Print the persisted JSON instead of a summary
        #[arg(long, conflicts_with = "canvas")]
        json: bool,

        /// Print the interactive canvas markup
        #[arg(long)]
        canvas: bool,

        /// Render the canvas markup in preview mode
        #[arg(long, requires = "canvas")]
        preview: bool,

        /// Item to show as selected in the canvas markup
        #[arg(long, requires = "canvas")]
        select: Option<String>,
    },

    /// Drop a new component at a client point
    Add {
        /// Component type: text, image, button, card or video
        kind: ItemKind,
        /// Client x of the drop point
        #[arg(allow_negative_numbers = true)]
        x: f64,
        /// Client y of the drop point
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Drag an item by a pointer delta
    Move {
        id: String,
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },

    /// Drag one of an item's resize handles by a pointer delta
    Resize {
        id: String,
        /// Handle: n, s, e, w, ne, nw, se or sw
        dir: ResizeDir,
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },

    /// Merge properties into an item, given as a JSON object
    Set { id: String, props: String },

    /// Delete an item
    Delete { id: String },

    /// Bring an item to the front
    Front { id: String },

    /// Send an item to the back
    Back { id: String },

    /// Remove every item, keeping canvas settings
    Clear,

    /// Show or change canvas settings
    Settings {
        /// Dark editor chrome
        #[arg(long)]
        dark: Option<bool>,

        /// Show the dot grid
        #[arg(long)]
        grid: Option<bool>,

        /// Canvas background color
        #[arg(long)]
        bg: Option<String>,
    },

    /// Attach an image file, or a pasted http(s) URL, to an image or card
    AttachImage {
        id: String,

        /// Image file to embed as a data URL
        #[arg(required_unless_present = "url", conflicts_with = "url")]
        file: Option<PathBuf>,

        /// Remote image URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Replace the page with a JSON file
    Import { file: PathBuf },

    /// Export the page
    Export {
        format: ExportFormat,

        /// Output file (defaults to page.html or page.json)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Normalize a YouTube or Vimeo link, optionally storing it on a video item
    VideoUrl {
        url: String,

        /// Video item to update
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Json,
}

impl ExportFormat {
    /// Default download file name.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Html => "page.html",
            ExportFormat::Json => "page.json",
        }
    }
}
