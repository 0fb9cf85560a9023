//! Scan dispatch: applies recognized options to the configuration store.
//!
//! One [`Dispatcher::run`] performs a complete left-to-right scan. Long
//! options are resolved by name through the store (following deprecation
//! redirects), short options through the table's short-code index, and the
//! value is coerced according to the item type before it is written.

use crate::core::item::{ConfigItem, ItemType};
use crate::core::keys::string_to_key;
use crate::core::store::ConfigStore;
use crate::options::error::CmdlineError;
use crate::options::scanner::{Match, Scanner};
use crate::options::table::{OptionForm, OptionTable, VERBOSE_SHORT};
use crate::util::diagnostic::{self, suggestions, Diagnostic};
use crate::util::numeric::{parse_float, parse_int_auto, parse_int_decimal};

/// Options controlling one parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Skip unknown options and scan a private copy of the arguments.
    pub ignore_errors: bool,

    /// Program name used in diagnostics.
    pub program_name: String,

    /// Print diagnostics to stderr as they occur.
    pub diagnostics: bool,

    /// Use ANSI colors when printing diagnostics.
    pub color: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            ignore_errors: false,
            program_name: "modopts".to_string(),
            diagnostics: false,
            color: false,
        }
    }
}

impl ParseOptions {
    /// Fail on the first unknown option.
    pub fn strict() -> Self {
        ParseOptions::default()
    }

    /// Skip unknown options.
    pub fn tolerant() -> Self {
        ParseOptions {
            ignore_errors: true,
            ..ParseOptions::default()
        }
    }

    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    pub fn with_diagnostics(mut self, color: bool) -> Self {
        self.diagnostics = true;
        self.color = color;
        self
    }
}

/// Outcome of a successful parse.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Deprecation warnings, in scan order
    pub warnings: Vec<Diagnostic>,
    /// Tokens skipped in tolerant mode
    pub skipped: Vec<String>,
    /// Arguments left after the options, in their original relative order
    pub positionals: Vec<String>,
    /// Number of store writes performed
    pub applied: usize,
}

struct VerboseCount<'r> {
    item: &'r ConfigItem,
    count: i64,
}

/// Applies scanner matches to a store.
pub struct Dispatcher<'t, 'r, S: ConfigStore + ?Sized> {
    table: &'t OptionTable<'r>,
    store: &'t mut S,
    options: &'t ParseOptions,
    verbose: Option<VerboseCount<'r>>,
    report: ParseReport,
}

impl<'t, 'r, S: ConfigStore + ?Sized> Dispatcher<'t, 'r, S> {
    pub fn new(table: &'t OptionTable<'r>, store: &'t mut S, options: &'t ParseOptions) -> Self {
        Dispatcher {
            table,
            store,
            options,
            verbose: None,
            report: ParseReport::default(),
        }
    }

    /// Scan `args` (element 0 is the program name) and apply every option.
    ///
    /// In strict mode `args` is permuted in place so positionals end up last.
    /// In tolerant mode a private copy is scanned and `args` is untouched.
    pub fn run(mut self, args: &mut [String]) -> Result<ParseReport, CmdlineError> {
        let table = self.table;

        let mut private = Vec::new();
        let argv: &mut [String] = if self.options.ignore_errors {
            private
                .try_reserve_exact(args.len())
                .map_err(CmdlineError::oom("argument copy"))?;
            private.extend(args.iter().cloned());
            &mut private
        } else {
            args
        };

        let mut scanner = Scanner::new(argv, table.short_spec(), table.raw_long_options());
        for matched in scanner.by_ref() {
            match matched {
                Match::Long { index, arg } => self.on_long(index, arg.as_deref())?,
                Match::Short { code, arg } => self.on_short(code, arg.as_deref())?,
                Match::Unrecognized { code, token } => self.reject(code, token)?,
            }
        }
        self.report.positionals = scanner.positionals().to_vec();

        if let Some(verbose) = self.verbose.take() {
            tracing::debug!("verbosity counted to {}", verbose.count);
            self.store.put_int(&verbose.item.name, verbose.count)?;
            self.report.applied += 1;
        }

        Ok(self.report)
    }

    fn on_long(&mut self, index: usize, arg: Option<&str>) -> Result<(), CmdlineError> {
        let table = self.table;
        let entry = &table.long_options()[index];
        let negated = entry.form == OptionForm::Negated;

        let Some(item) = self.store.find(entry.canonical_name()).cloned() else {
            return self.reject(None, format!("--{}", entry.name));
        };

        let item = match item.deprecated.clone() {
            None => item,
            Some(redirect) if redirect.strict => {
                let err = CmdlineError::RemovedOption {
                    name: item.name.clone(),
                    replacement: redirect.replacement.clone(),
                };
                if !self.options.ignore_errors {
                    return self.fail(err);
                }
                let mut diag = err.to_diagnostic();
                diag.severity = diagnostic::Severity::Warning;
                self.warn(diag);
                return Ok(());
            }
            Some(redirect) => {
                self.warn(
                    Diagnostic::warning(format!("option `--{}` is deprecated", item.name))
                        .with_suggestion(suggestions::use_instead(&redirect.replacement)),
                );
                match self.store.find(&redirect.replacement).cloned() {
                    Some(target) => target,
                    None => return self.reject(None, format!("--{}", redirect.replacement)),
                }
            }
        };

        self.apply(&item, arg, negated)
    }

    fn on_short(&mut self, code: u8, arg: Option<&str>) -> Result<(), CmdlineError> {
        let Some(item) = self.table.short_item(code) else {
            return self.reject(Some(code), format!("-{}", char::from(code)));
        };

        if code == VERBOSE_SHORT && item.item_type == ItemType::Integer {
            let step = match arg {
                None => 1,
                Some(text) if text.starts_with('v') => {
                    1 + text.bytes().take_while(|&b| b == b'v').count() as i64
                }
                Some(text) => parse_int_decimal(text),
            };
            let counter = self.verbose.get_or_insert(VerboseCount { item, count: 0 });
            counter.count = counter.count.saturating_add(step);
            return Ok(());
        }

        self.apply(item, arg, false)
    }

    fn apply(
        &mut self,
        item: &ConfigItem,
        arg: Option<&str>,
        negated: bool,
    ) -> Result<(), CmdlineError> {
        let name = item.name.as_str();

        match item.item_type {
            ItemType::Hint => return Ok(()),
            ItemType::Boolean => self.store.put_bool(name, !negated)?,
            item_type => {
                let Some(text) = arg else {
                    return self.reject(None, format!("--{}", name));
                };
                match item_type {
                    ItemType::Integer => self.store.put_int(name, parse_int_auto(text))?,
                    ItemType::Float => self.store.put_float(name, parse_float(text) as f32)?,
                    ItemType::Key => self.store.put_int(name, string_to_key(text))?,
                    _ => self.store.put_string(name, Some(text))?,
                }
            }
        }

        tracing::debug!("applied `--{}`", name);
        self.report.applied += 1;
        Ok(())
    }

    /// Unknown option or missing argument.
    fn reject(&mut self, code: Option<u8>, token: String) -> Result<(), CmdlineError> {
        if self.options.ignore_errors {
            tracing::debug!("skipping unrecognized option `{}`", token);
            self.report.skipped.push(token);
            return Ok(());
        }

        let option = match code {
            Some(c) => format!("-{}", char::from(c)),
            None => token,
        };
        self.fail(CmdlineError::UnknownOption {
            program: self.options.program_name.clone(),
            option,
        })
    }

    fn fail(&self, err: CmdlineError) -> Result<(), CmdlineError> {
        if self.options.diagnostics {
            diagnostic::emit(&err.to_diagnostic(), self.options.color);
        }
        Err(err)
    }

    fn warn(&mut self, diag: Diagnostic) {
        tracing::debug!("{}", diag.message);
        if self.options.diagnostics {
            diagnostic::emit(&diag, self.options.color);
        }
        self.report.warnings.push(diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::{KEY_MODIFIER_CTRL, KEY_SPACE};
    use crate::core::store::MemoryStore;
    use crate::test_support::{argv, sample_bank};

    fn parse(
        list: &[&str],
        options: &ParseOptions,
    ) -> (MemoryStore, Result<ParseReport, CmdlineError>) {
        let bank = sample_bank();
        let mut store = MemoryStore::from_registry(&bank);
        let table = OptionTable::build(&bank).unwrap();
        let mut args = argv(list);
        let result = Dispatcher::new(&table, &mut store, options).run(&mut args);
        (store, result)
    }

    fn strict(list: &[&str]) -> (MemoryStore, ParseReport) {
        let (store, result) = parse(list, &ParseOptions::strict());
        (store, result.unwrap())
    }

    #[test]
    fn test_boolean_forms() {
        let (store, _) = strict(&["--fullscreen"]);
        assert_eq!(store.get_bool("fullscreen"), Some(true));

        let (store, _) = strict(&["--noaudio"]);
        assert_eq!(store.get_bool("audio"), Some(false));

        let (store, _) = strict(&["--no-audio"]);
        assert_eq!(store.get_bool("audio"), Some(false));

        // absent leaves the default alone
        let (store, _) = strict(&["--fullscreen"]);
        assert_eq!(store.get_bool("audio"), Some(true));
    }

    #[test]
    fn test_later_option_wins() {
        let (store, _) = strict(&["--fullscreen", "--no-fullscreen"]);
        assert_eq!(store.get_bool("fullscreen"), Some(false));
    }

    #[test]
    fn test_short_argument_forms_agree() {
        let (split, _) = strict(&["-w", "7"]);
        let (joined, _) = strict(&["-w7"]);
        assert_eq!(split.get_int("width"), Some(7));
        assert_eq!(split.get("width"), joined.get("width"));
    }

    #[test]
    fn test_short_boolean() {
        let (store, _) = strict(&["-f"]);
        assert_eq!(store.get_bool("fullscreen"), Some(true));
    }

    #[test]
    fn test_verbose_accumulation() {
        for list in [&["-v", "-v", "-v"][..], &["-vvv"], &["-v3"], &["-v", "-vv"]] {
            let (store, _) = strict(list);
            assert_eq!(store.get_int("verbose"), Some(3), "{list:?}");
        }
    }

    #[test]
    fn test_verbose_written_once() {
        let (store, report) = strict(&["-v", "-v"]);
        assert_eq!(store.get_int("verbose"), Some(2));
        assert_eq!(report.applied, 1);
    }

    #[test]
    fn test_verbose_long_form_overwrites() {
        let (store, _) = strict(&["--verbose=5"]);
        assert_eq!(store.get_int("verbose"), Some(5));
    }

    #[test]
    fn test_typed_values() {
        let (store, _) = strict(&[
            "--width=0x20",
            "--zoom",
            "2.5",
            "--intf=dummy",
            "--key-quit=Ctrl-Space",
            "--config",
            "/tmp/a.conf",
        ]);
        assert_eq!(store.get_int("width"), Some(32));
        assert_eq!(store.get_float("zoom"), Some(2.5));
        assert_eq!(store.get_string("intf"), Some("dummy"));
        assert_eq!(
            store.get_int("key-quit"),
            Some(KEY_MODIFIER_CTRL | KEY_SPACE)
        );
        assert_eq!(store.get_string("config"), Some("/tmp/a.conf"));
    }

    #[test]
    fn test_garbage_numbers_coerce() {
        let (store, _) = strict(&["--width=abc", "--zoom=x"]);
        assert_eq!(store.get_int("width"), Some(0));
        assert_eq!(store.get_float("zoom"), Some(0.0));
    }

    #[test]
    fn test_strict_redirect_in_strict_mode() {
        let (store, result) = parse(&["--gone=1"], &ParseOptions::strict());
        let err = result.unwrap_err();
        assert!(matches!(err, CmdlineError::RemovedOption { ref name, .. } if name == "gone"));
        assert_eq!(store.get_int("width"), Some(0));
    }

    #[test]
    fn test_strict_redirect_in_tolerant_mode() {
        let (store, result) = parse(&["--gone=1", "-w", "4"], &ParseOptions::tolerant());
        let report = result.unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("`--gone` no longer exists"));
        // the removed option was not applied, scanning continued
        assert_eq!(store.get_int("width"), Some(4));
        assert_eq!(store.get_int("gone"), Some(0));
    }

    #[test]
    fn test_advisory_redirect_applies_replacement() {
        for options in [ParseOptions::strict(), ParseOptions::tolerant()] {
            let (store, result) = parse(&["--old-width=1"], &options);
            let report = result.unwrap();
            assert_eq!(store.get_int("width"), Some(1));
            assert_eq!(store.get_int("old-width"), Some(0));
            assert_eq!(report.warnings.len(), 1);
            assert_eq!(
                report.warnings[0].suggestions,
                vec!["Use `--width` instead".to_string()]
            );
        }
    }

    #[test]
    fn test_advisory_redirect_keeps_polarity() {
        let (store, _) = strict(&["--fullscreen", "--no-old-fullscreen"]);
        assert_eq!(store.get_bool("fullscreen"), Some(false));
    }

    #[test]
    fn test_unknown_long_option() {
        let (_, result) = parse(&["--bogus"], &ParseOptions::strict());
        match result.unwrap_err() {
            CmdlineError::UnknownOption { option, program } => {
                assert_eq!(option, "--bogus");
                assert_eq!(program, "modopts");
            }
            other => panic!("unexpected error: {other}"),
        }

        let (store, result) = parse(&["--bogus"], &ParseOptions::tolerant());
        let report = result.unwrap();
        assert_eq!(report.skipped, vec!["--bogus".to_string()]);
        assert_eq!(report.applied, 0);
        let pristine = MemoryStore::from_registry(&sample_bank());
        assert_eq!(store.snapshot(), pristine.snapshot());
    }

    #[test]
    fn test_unknown_short_names_character() {
        let (_, result) = parse(&["-fz"], &ParseOptions::strict());
        match result.unwrap_err() {
            CmdlineError::UnknownOption { option, .. } => assert_eq!(option, "-z"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_argument() {
        let (_, result) = parse(&["--width"], &ParseOptions::strict());
        assert!(matches!(
            result.unwrap_err(),
            CmdlineError::UnknownOption { ref option, .. } if option == "--width"
        ));

        let (_, result) = parse(&["-w"], &ParseOptions::strict());
        assert!(matches!(
            result.unwrap_err(),
            CmdlineError::UnknownOption { ref option, .. } if option == "-w"
        ));
    }

    #[test]
    fn test_tolerant_mode_keeps_caller_arguments() {
        let bank = sample_bank();
        let mut store = MemoryStore::from_registry(&bank);
        let table = OptionTable::build(&bank).unwrap();
        let mut args = argv(&["movie.mkv", "--bogus", "-f", "--width", "3"]);
        let before = args.clone();

        let options = ParseOptions::tolerant();
        let report = Dispatcher::new(&table, &mut store, &options)
            .run(&mut args)
            .unwrap();

        assert_eq!(args, before);
        assert_eq!(report.positionals, vec!["movie.mkv".to_string()]);
        assert_eq!(store.get_int("width"), Some(3));
        assert_eq!(store.get_bool("fullscreen"), Some(true));
    }

    #[test]
    fn test_strict_mode_permutes_caller_arguments() {
        let bank = sample_bank();
        let mut store = MemoryStore::from_registry(&bank);
        let table = OptionTable::build(&bank).unwrap();
        let mut args = argv(&["movie.mkv", "-f"]);

        let options = ParseOptions::strict();
        let report = Dispatcher::new(&table, &mut store, &options)
            .run(&mut args)
            .unwrap();

        assert_eq!(args, argv(&["-f", "movie.mkv"]));
        assert_eq!(report.positionals, vec!["movie.mkv".to_string()]);
    }

    #[test]
    fn test_repeated_runs_are_independent() {
        let bank = sample_bank();
        let table = OptionTable::build(&bank).unwrap();
        let options = ParseOptions::strict();

        let mut store = MemoryStore::from_registry(&bank);
        for _ in 0..2 {
            let mut args = argv(&["-v", "-q"]);
            Dispatcher::new(&table, &mut store, &options)
                .run(&mut args)
                .unwrap();
            assert_eq!(store.get_int("verbose"), Some(1));
            assert_eq!(store.get_bool("quiet"), Some(true));
        }
    }
}
