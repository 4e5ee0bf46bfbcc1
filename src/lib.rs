//! stamp - content-hashed asset writer and template directive rewriter.
//!
//! ```text
//! [% javascripts app %]              ──► app-<sha1>.js  (written to disk)
//! [% javascripts inline tracking %]  ──► <compiled content>
//! ```
//!
//! | Module        | Purpose                                         |
//! |---------------|-------------------------------------------------|
//! | `manager`     | Environment binding, writer, directive rewriter |
//! | `environment` | Engine traits and the filesystem engine         |
//! | `options`     | Defaults merged with user options               |
//! | `config`      | `stamp.toml` loading                            |
//! | `logger`      | Colored log lines and progress display          |

pub mod config;
pub mod environment;
pub mod error;
pub mod logger;
pub mod manager;
pub mod options;
pub mod utils;

pub use environment::{Artifact, Environment, FsEnvironment, OptionSetter, WriteFlags};
pub use error::AssetError;
pub use manager::{AssetManager, Directive, DirectiveKind, WriteOptions};
pub use options::{OptionValue, Options};
