//! Command line grammar and option validation.
//!
//! Options are literal single-dash tokens (`-before`, `-zip`, ...). The first
//! argument that is not a known option starts the list of directory roots;
//! everything after it is taken as a path, even if it looks like an option.

use std::collections::HashSet;
use std::path::PathBuf;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::OptionError;

/// Every option the command line understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum OptionName {
    #[strum(serialize = "-before")]
    Before,
    #[strum(serialize = "-after")]
    After,
    #[strum(serialize = "-match")]
    Match,
    #[strum(serialize = "-bigger")]
    Bigger,
    #[strum(serialize = "-smaller")]
    Smaller,
    #[strum(serialize = "-duplcont")]
    DuplicateContent,
    #[strum(serialize = "-duplname")]
    DuplicateName,
    #[strum(serialize = "-delete")]
    Delete,
    #[strum(serialize = "-zip")]
    Zip,
    #[strum(serialize = "-nofilelist")]
    NoFileList,
    #[strum(serialize = "-stats")]
    Stats,
}

impl OptionName {
    /// Whether the option consumes the following argument as its value.
    pub fn takes_value(self) -> bool {
        matches!(
            self,
            Self::Before | Self::After | Self::Match | Self::Bigger | Self::Smaller | Self::Zip
        )
    }
}

/// Selector values exactly as they appeared on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSelectors {
    pub before: Option<String>,
    pub after: Option<String>,
    pub pattern: Option<String>,
    pub bigger: Option<String>,
    pub smaller: Option<String>,
}

/// A parsed but not yet validated command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub selectors: RawSelectors,
    pub delete: bool,
    pub zip: Option<String>,
    pub no_file_list: bool,
    pub stats: bool,
    pub duplicate_content: bool,
    pub duplicate_name: bool,
    pub paths: Vec<String>,
}

impl CommandLine {
    /// Split raw arguments (program name excluded) into options and paths.
    pub fn parse<I, S>(args: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut line = Self::default();
        let mut seen = HashSet::new();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            let Ok(option) = arg.parse::<OptionName>() else {
                line.paths.push(arg);
                line.paths.extend(args.by_ref());
                break;
            };

            if !seen.insert(option) {
                return Err(OptionError::Repeated { option });
            }

            let value = if option.takes_value() {
                Some(args.next().ok_or(OptionError::MissingValue { option })?)
            } else {
                None
            };

            line.set(option, value);
        }

        Ok(line)
    }

    fn set(&mut self, option: OptionName, value: Option<String>) {
        match option {
            OptionName::Before => self.selectors.before = value,
            OptionName::After => self.selectors.after = value,
            OptionName::Match => self.selectors.pattern = value,
            OptionName::Bigger => self.selectors.bigger = value,
            OptionName::Smaller => self.selectors.smaller = value,
            OptionName::Zip => self.zip = value,
            OptionName::Delete => self.delete = true,
            OptionName::NoFileList => self.no_file_list = true,
            OptionName::Stats => self.stats = true,
            OptionName::DuplicateContent => self.duplicate_content = true,
            OptionName::DuplicateName => self.duplicate_name = true,
        }
    }

    /// Enforce the mutual exclusions between modes and operations.
    pub fn validate(self) -> Result<CommandPlan, OptionError> {
        let duplicates = match (self.duplicate_content, self.duplicate_name) {
            (true, true) => return Err(OptionError::BothDuplicateModes),
            (true, false) => Some(DuplicateMode::Content),
            (false, true) => Some(DuplicateMode::Name),
            (false, false) => None,
        };

        if self.no_file_list && duplicates.is_some() {
            return Err(OptionError::NoListingWithDuplicates);
        }

        if duplicates.is_some() && (self.delete || self.zip.is_some()) {
            return Err(OptionError::DuplicatesWithOperation);
        }

        let operation = match (self.delete, self.zip) {
            (true, Some(_)) => return Err(OptionError::DeleteWithArchive),
            (true, None) => Some(Operation::Delete),
            (false, Some(destination)) => Some(Operation::Archive {
                destination: PathBuf::from(destination),
            }),
            (false, None) => None,
        };

        Ok(CommandPlan {
            selectors: self.selectors,
            operation,
            output: OutputModes {
                no_file_list: self.no_file_list,
                stats: self.stats,
                duplicates,
            },
            paths: self.paths,
        })
    }
}

/// How duplicate buckets are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DuplicateMode {
    /// Group by file base name.
    #[strum(serialize = "name")]
    Name,
    /// Group by content digest.
    #[strum(serialize = "content")]
    Content,
}

/// A mutating operation applied to the selected set after reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Delete,
    Archive { destination: PathBuf },
}

/// Output switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputModes {
    pub no_file_list: bool,
    pub stats: bool,
    pub duplicates: Option<DuplicateMode>,
}

impl OutputModes {
    /// Whether selected files are printed as they are found.
    pub fn listing_enabled(&self) -> bool {
        !self.no_file_list
    }
}

/// A validated command: what to select, where, and what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub selectors: RawSelectors,
    pub operation: Option<Operation>,
    pub output: OutputModes,
    pub paths: Vec<String>,
}

impl CommandPlan {
    /// Parse and validate raw arguments in one step.
    pub fn from_args<I, S>(args: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::parse(args)?.validate()
    }

    /// Output modes as the traversal should see them.
    ///
    /// A duplicate report prints its own listing, so plain listing is
    /// suppressed whenever one is requested.
    pub fn effective_output(&self) -> OutputModes {
        let mut output = self.output;
        if output.duplicates.is_some() {
            output.no_file_list = true;
        }
        output
    }
}
