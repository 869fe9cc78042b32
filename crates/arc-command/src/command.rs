//! Builder for assembling review-tool command lines
//!
//! [`CommandBuilder`] accumulates a command name, an optional sub-action,
//! and an ordered list of argument tokens, validating each token's shape as
//! it is added. [`CommandBuilder::build`] finalizes the sequence into an
//! immutable [`CommandSpec`]. Every token is one argv element; the
//! `*_with_value` methods deliberately join key and value into a single
//! element.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Error, Result};

/// A key paired with a value, joined by the builder at insertion time
///
/// The pair itself carries no joining convention; the builder method it is
/// passed to decides between a space and an equals sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    /// Create a new key/value pair
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key half of the pair
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value half of the pair
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for KeyValue {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// A finalized command line ready to be spawned
///
/// The first token is the program; the rest are its arguments in the order
/// the builder accumulated them. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    tokens: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a spec directly from a pre-assembled token sequence
    ///
    /// Fails with [`Error::EmptySpec`] if the sequence is empty or its
    /// first token is blank.
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        match tokens.first() {
            Some(program) if !program.trim().is_empty() => Ok(Self {
                tokens,
                working_dir: None,
            }),
            _ => Err(Error::EmptySpec),
        }
    }

    /// Attach a working directory for the child process
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// The program to execute (the first token)
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// The argument tokens following the program
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// The full token sequence, program included
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The working directory for the child, if one was set
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

/// Fluent builder for a [`CommandSpec`]
///
/// Every setter consumes the builder and returns it (wrapped in `Result`
/// where validation applies), so a token list can never be shared between
/// two builds. Positions given to the `*_at` variants index into the
/// accumulated argument list; the command and action are prepended only at
/// [`build`](CommandBuilder::build) time.
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    command: Option<String>,
    action: Option<String>,
    working_dir: Option<PathBuf>,
    args: Vec<String>,
}

impl CommandBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory the command will run in
    pub fn working_dir(mut self, dir: impl AsRef<str>) -> Result<Self> {
        let dir = non_blank(dir.as_ref(), "working directory")?;
        self.working_dir = Some(PathBuf::from(dir));
        Ok(self)
    }

    /// Set the command name (the program to execute)
    pub fn command(mut self, command: impl AsRef<str>) -> Result<Self> {
        let command = non_blank(command.as_ref(), "command")?;
        self.command = Some(command.to_string());
        Ok(self)
    }

    /// Set the sub-action, placed immediately after the command name
    pub fn action(mut self, action: impl AsRef<str>) -> Result<Self> {
        let action = non_blank(action.as_ref(), "action")?;
        self.action = Some(action.to_string());
        Ok(self)
    }

    /// Append a raw argument token
    pub fn arg(mut self, arg: impl AsRef<str>) -> Result<Self> {
        let arg = non_blank(arg.as_ref(), "argument")?;
        self.args.push(arg.to_string());
        Ok(self)
    }

    /// Insert a raw argument token at the given position
    pub fn arg_at(mut self, position: usize, arg: impl AsRef<str>) -> Result<Self> {
        let arg = non_blank(arg.as_ref(), "argument")?;
        self.check_position(position)?;
        self.args.insert(position, arg.to_string());
        Ok(self)
    }

    /// Append multiple raw argument tokens in order
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a flag, normalized through the flag grammar
    pub fn flag(mut self, flag: impl AsRef<str>) -> Result<Self> {
        let flag = non_blank(flag.as_ref(), "flag")?;
        let flag = format_flag(flag)?;
        self.args.push(flag);
        Ok(self)
    }

    /// Insert a normalized flag at the given position
    pub fn flag_at(mut self, position: usize, flag: impl AsRef<str>) -> Result<Self> {
        let flag = non_blank(flag.as_ref(), "flag")?;
        let flag = format_flag(flag)?;
        self.check_position(position)?;
        self.args.insert(position, flag);
        Ok(self)
    }

    /// Append a single `"<key> <value>"` token, key left as given
    pub fn arg_with_value(mut self, pair: impl Into<KeyValue>) -> Self {
        let pair = pair.into();
        self.args.push(format!("{} {}", pair.key(), pair.value()));
        self
    }

    /// Insert a single `"<key> <value>"` token at the given position
    pub fn arg_with_value_at(mut self, position: usize, pair: impl Into<KeyValue>) -> Result<Self> {
        let pair = pair.into();
        self.check_position(position)?;
        self.args
            .insert(position, format!("{} {}", pair.key(), pair.value()));
        Ok(self)
    }

    /// Append a single `"<--key> <value>"` token, key normalized as a flag
    pub fn flag_with_value(mut self, pair: impl Into<KeyValue>) -> Result<Self> {
        let pair = pair.into();
        let flag = format_flag(pair.key())?;
        self.args.push(format!("{} {}", flag, pair.value()));
        Ok(self)
    }

    /// Insert a single `"<--key> <value>"` token at the given position
    pub fn flag_with_value_at(mut self, position: usize, pair: impl Into<KeyValue>) -> Result<Self> {
        let pair = pair.into();
        let flag = format_flag(pair.key())?;
        self.check_position(position)?;
        self.args.insert(position, format!("{} {}", flag, pair.value()));
        Ok(self)
    }

    /// Append a single `"<key>=<value>"` token, key left as given
    pub fn arg_with_value_equals(mut self, pair: impl Into<KeyValue>) -> Self {
        let pair = pair.into();
        self.args.push(format!("{}={}", pair.key(), pair.value()));
        self
    }

    /// Insert a single `"<key>=<value>"` token at the given position
    pub fn arg_with_value_equals_at(
        mut self,
        position: usize,
        pair: impl Into<KeyValue>,
    ) -> Result<Self> {
        let pair = pair.into();
        self.check_position(position)?;
        self.args
            .insert(position, format!("{}={}", pair.key(), pair.value()));
        Ok(self)
    }

    /// Append a single `"<--key>=<value>"` token, key normalized as a flag
    pub fn flag_with_value_equals(mut self, pair: impl Into<KeyValue>) -> Result<Self> {
        let pair = pair.into();
        let flag = format_flag(pair.key())?;
        self.args.push(format!("{}={}", flag, pair.value()));
        Ok(self)
    }

    /// Insert a single `"<--key>=<value>"` token at the given position
    pub fn flag_with_value_equals_at(
        mut self,
        position: usize,
        pair: impl Into<KeyValue>,
    ) -> Result<Self> {
        let pair = pair.into();
        let flag = format_flag(pair.key())?;
        self.check_position(position)?;
        self.args.insert(position, format!("{}={}", flag, pair.value()));
        Ok(self)
    }

    /// Finalize the accumulated tokens into a [`CommandSpec`]
    ///
    /// Fails with [`Error::MissingCommand`] if no command name was ever
    /// set. The finalized sequence is the command, then the action if one
    /// was set, then the accumulated tokens in their insertion order.
    pub fn build(self) -> Result<CommandSpec> {
        let command = self.command.ok_or(Error::MissingCommand)?;
        let mut tokens = Vec::with_capacity(self.args.len() + 2);
        tokens.push(command);
        if let Some(action) = self.action {
            tokens.push(action);
        }
        tokens.extend(self.args);
        Ok(CommandSpec {
            tokens,
            working_dir: self.working_dir,
        })
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position > self.args.len() {
            return Err(Error::PositionOutOfBounds {
                position,
                len: self.args.len(),
            });
        }
        Ok(())
    }
}

/// Normalize a candidate string into a `--flag` token
///
/// Accepts an already-dashed token (`--name`) unchanged and promotes a bare
/// word (`name`) to `--name`; anything else is rejected.
fn format_flag(flag: &str) -> Result<String> {
    let dashed = Regex::new(r"^--\w+$").unwrap();
    let bare = Regex::new(r"^\w+$").unwrap();
    let trimmed = flag.trim();
    if dashed.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else if bare.is_match(trimmed) {
        Ok(format!("--{trimmed}"))
    } else {
        Err(Error::InvalidFlag {
            flag: flag.to_string(),
        })
    }
}

fn non_blank<'a>(value: &'a str, what: &'static str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(Error::blank(what))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flag_promotes_bare_word() {
        assert_eq!(format_flag("x").unwrap(), "--x");
        assert_eq!(format_flag("verbose").unwrap(), "--verbose");
    }

    #[test]
    fn test_format_flag_keeps_dashed() {
        assert_eq!(format_flag("--flag").unwrap(), "--flag");
        assert_eq!(format_flag("  --flag  ").unwrap(), "--flag");
    }

    #[test]
    fn test_format_flag_rejects_bad_shapes() {
        assert!(matches!(
            format_flag("bad flag"),
            Err(Error::InvalidFlag { .. })
        ));
        assert!(matches!(format_flag("--"), Err(Error::InvalidFlag { .. })));
        assert!(matches!(
            format_flag("-short"),
            Err(Error::InvalidFlag { .. })
        ));
    }

    #[test]
    fn test_build_prepends_command_and_action() {
        let spec = CommandBuilder::new()
            .command("arc")
            .unwrap()
            .action("diff")
            .unwrap()
            .flag("verbose")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(spec.tokens(), ["arc", "diff", "--verbose"]);
        assert_eq!(spec.program(), "arc");
        assert_eq!(spec.args(), ["diff", "--verbose"]);
    }

    #[test]
    fn test_build_without_command_fails() {
        let result = CommandBuilder::new()
            .arg("something")
            .unwrap()
            .flag("verbose")
            .unwrap()
            .build();
        assert!(matches!(result, Err(Error::MissingCommand)));
    }

    #[test]
    fn test_blank_inputs_rejected() {
        assert!(matches!(
            CommandBuilder::new().command("  "),
            Err(Error::BlankArgument { what: "command" })
        ));
        assert!(matches!(
            CommandBuilder::new().action(""),
            Err(Error::BlankArgument { what: "action" })
        ));
        assert!(matches!(
            CommandBuilder::new().arg(" "),
            Err(Error::BlankArgument { what: "argument" })
        ));
        assert!(matches!(
            CommandBuilder::new().working_dir(""),
            Err(Error::BlankArgument { .. })
        ));
    }

    #[test]
    fn test_value_joining_conventions() {
        let spec = CommandBuilder::new()
            .command("arc")
            .unwrap()
            .arg_with_value(("k", "v"))
            .flag_with_value(("flag", "v"))
            .unwrap()
            .arg_with_value_equals(("k", "v"))
            .flag_with_value_equals(("flag", "v"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(spec.args(), ["k v", "--flag v", "k=v", "--flag=v"]);
    }

    #[test]
    fn test_positional_insert_preserves_order() {
        let spec = CommandBuilder::new()
            .command("arc")
            .unwrap()
            .args(["first", "third"])
            .arg_at(1, "second")
            .unwrap()
            .flag_at(0, "f")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(spec.tokens(), ["arc", "--f", "first", "second", "third"]);
    }

    #[test]
    fn test_position_out_of_bounds() {
        let result = CommandBuilder::new().command("arc").unwrap().arg_at(3, "x");
        assert!(matches!(
            result,
            Err(Error::PositionOutOfBounds { position: 3, len: 0 })
        ));
    }

    #[test]
    fn test_spec_from_token_sequence() {
        let spec = CommandSpec::new(["arc", "which"]).unwrap();
        assert_eq!(spec.program(), "arc");
        assert_eq!(spec.args(), ["which"]);

        assert!(matches!(
            CommandSpec::new(Vec::<String>::new()),
            Err(Error::EmptySpec)
        ));
        assert!(matches!(CommandSpec::new([" "]), Err(Error::EmptySpec)));
    }

    #[test]
    fn test_working_dir_carried_into_spec() {
        let spec = CommandBuilder::new()
            .command("arc")
            .unwrap()
            .working_dir("/work/checkout")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(spec.working_dir(), Some(Path::new("/work/checkout")));
    }
}
