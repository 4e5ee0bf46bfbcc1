//! Template directive substitution.
//!
//! Directives embed asset references in arbitrary text:
//!
//! ```text
//! <script src="/js/[% javascripts app %]"></script>      → app-<H>.js
//! <script>[% javascripts inline vendor/tracking %]</script> → raw content
//! ```
//!
//! The verb is the manager's asset type and the delimiters come from the
//! `source_open` / `source_close` options. `inline` is a keyword only when
//! followed by whitespace, so `inline_helpers` is an ordinary name.
//!
//! Directives that do not resolve are left as they are, with a warning.

use std::ops::Range;

use regex::Regex;

use super::{AssetManager, WriteOptions};
use crate::environment::{Artifact, Environment};
use crate::error::AssetError;
use crate::{debug, log};

/// Which substitution a directive asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Replaced by the hashed output name.
    Link,
    /// Replaced by the compiled content itself.
    Inline,
}

/// One directive found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Byte range of the whole directive, delimiters included.
    pub range: Range<usize>,
    pub kind: DirectiveKind,
    pub logical_name: &'a str,
}

/// Build the directive pattern for the given delimiters and verb.
pub fn directive_pattern(open: &str, close: &str, verb: &str) -> Result<Regex, AssetError> {
    let pattern = format!(
        r"{open}\s*{verb}\s+(?:inline\s+(?P<inline>\S+?)|(?P<name>\S+?))\s*{close}",
        open = regex::escape(open),
        close = regex::escape(close),
        verb = regex::escape(verb),
    );
    Ok(Regex::new(&pattern)?)
}

/// Find every non-overlapping directive in `text`, in source order.
pub fn scan<'a>(pattern: &Regex, text: &'a str) -> Vec<Directive<'a>> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (kind, name) = match (caps.name("inline"), caps.name("name")) {
                (Some(name), _) => (DirectiveKind::Inline, name),
                (None, Some(name)) => (DirectiveKind::Link, name),
                (None, None) => return None,
            };
            Some(Directive {
                range: whole.range(),
                kind,
                logical_name: name.as_str(),
            })
        })
        .collect()
}

impl<E: Environment> AssetManager<E> {
    /// Rewrite every directive in `text` into a new string.
    pub fn rewrite(&mut self, text: &str) -> Result<String, AssetError> {
        self.compute_rewrite(text)
    }

    /// Rewrite every directive in `text` in place.
    ///
    /// On error the buffer is left untouched.
    pub fn rewrite_in_place(&mut self, text: &mut String) -> Result<(), AssetError> {
        *text = self.compute_rewrite(text)?;
        Ok(())
    }

    /// The cached directive pattern, built on first use.
    fn pattern(&mut self) -> Result<Regex, AssetError> {
        if let Some(pattern) = &self.pattern {
            return Ok(pattern.clone());
        }
        let pattern = directive_pattern(
            self.options.source_open(),
            self.options.source_close(),
            &self.asset_type,
        )?;
        self.pattern = Some(pattern.clone());
        Ok(pattern)
    }

    fn compute_rewrite(&mut self, text: &str) -> Result<String, AssetError> {
        let pattern = self.pattern()?;
        let directives = scan(&pattern, text);
        if directives.is_empty() {
            return Ok(text.to_string());
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for directive in &directives {
            output.push_str(&text[last..directive.range.start]);
            let source = &text[directive.range.clone()];

            match self.resolve(directive)? {
                Some(replacement) => {
                    debug!("rewrite"; "{} -> {} bytes", source, replacement.len());
                    output.push_str(&replacement);
                }
                None => {
                    log!("warning"; "unresolved directive `{}`, left as is", source);
                    output.push_str(source);
                }
            }
            last = directive.range.end;
        }
        output.push_str(&text[last..]);

        Ok(output)
    }

    fn resolve(&mut self, directive: &Directive<'_>) -> Result<Option<String>, AssetError> {
        match directive.kind {
            DirectiveKind::Link => self.write(directive.logical_name, &WriteOptions::default()),
            DirectiveKind::Inline => Ok(self
                .compiled()
                .find_asset(directive.logical_name)?
                .map(|asset| asset.to_text().into_owned())),
        }
    }
}
