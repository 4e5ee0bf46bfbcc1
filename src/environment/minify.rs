//! JS and CSS compressors for the filesystem environment.
//!
//! Uses oxc for JavaScript and lightningcss for CSS.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

/// Compressor selected by the `js_compressor` / `css_compressor` options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compressor {
    #[default]
    None,
    Oxc,
    Lightningcss,
}

impl Compressor {
    /// Parse a compressor name. Returns `Option::None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Some(Self::None),
            "oxc" => Some(Self::Oxc),
            "lightningcss" => Some(Self::Lightningcss),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Oxc => "oxc",
            Self::Lightningcss => "lightningcss",
        }
    }

    /// Compress `source`, keeping it unchanged if compression fails.
    pub fn apply(self, source: String) -> String {
        let compressed = match self {
            Self::None => None,
            Self::Oxc => Self::oxc(&source),
            Self::Lightningcss => Self::lightningcss(&source),
        };
        compressed.unwrap_or(source)
    }

    /// Mangle and compress an ES module. `None` on parse errors.
    fn oxc(source: &str) -> Option<String> {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, SourceType::mjs()).parse();
        if !parsed.errors.is_empty() {
            return None;
        }

        let mut program = parsed.program;
        let minified = Minifier::new(MinifierOptions {
            mangle: Some(MangleOptions::default()),
            compress: Some(CompressOptions::smallest()),
        })
        .minify(&allocator, &mut program);

        let codegen = CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        };
        Some(
            Codegen::new()
                .with_options(codegen)
                .with_scoping(minified.scoping)
                .build(&program)
                .code,
        )
    }

    fn lightningcss(source: &str) -> Option<String> {
        let printer = PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        };
        StyleSheet::parse(source, ParserOptions::default())
            .ok()?
            .to_css(printer)
            .ok()
            .map(|css| css.code)
    }
}
