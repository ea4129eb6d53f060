//! Positional invocation compatibility.
//!
//! `jsonschema-validator <schema> [<output>]` predates the subcommands and
//! is still used by CI scripts. It is rewritten into the equivalent
//! `validate-schema` invocation before clap sees the arguments.

use std::ffi::OsString;

/// First arguments that are never treated as a legacy schema path.
pub const SUBCOMMANDS: [&str; 4] = ["validate-schema", "validate-batch", "generate-fixtures", "help"];

/// Rewrite a legacy positional command line.
///
/// `args` is the full argument vector including the program name. Leading
/// global flags (`-v`, `--verbose`, `--log-json`) are skipped; the vector is
/// returned unchanged unless the next argument is neither a known
/// subcommand nor a flag. Arguments after the optional output path are
/// kept, so `schema.json --json` still works.
pub fn rewrite_legacy_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let schema_at = 1 + args.iter().skip(1).take_while(|a| is_global_flag(a)).count();
    match args.get(schema_at) {
        Some(first) if is_legacy_schema_arg(first) => {}
        _ => return args,
    }

    let mut rest = args.into_iter();
    let mut rewritten: Vec<OsString> = rest.by_ref().take(schema_at).collect();
    rewritten.push("validate-schema".into());
    rewritten.push("--schema".into());
    rewritten.extend(rest.next());

    let mut rest = rest.peekable();
    if let Some(output) = rest.next_if(|a| !starts_with_dash(a)) {
        rewritten.push("--output".into());
        rewritten.push(output);
    }
    rewritten.extend(rest);
    rewritten
}

fn is_legacy_schema_arg(arg: &OsString) -> bool {
    let Some(text) = arg.to_str() else {
        return true;
    };
    !text.starts_with('-') && !SUBCOMMANDS.contains(&text)
}

fn is_global_flag(arg: &OsString) -> bool {
    match arg.to_str() {
        Some("--verbose" | "--log-json") => true,
        Some(text) => text.len() > 1 && text.starts_with('-') && text[1..].chars().all(|c| c == 'v'),
        None => false,
    }
}

fn starts_with_dash(arg: &OsString) -> bool {
    arg.to_string_lossy().starts_with('-')
}
