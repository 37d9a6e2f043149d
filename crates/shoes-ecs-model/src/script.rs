//! Setup script flattening.
//!
//! The container command override accepts a single string, so a multi-line
//! setup script is turned into sequential shell statements joined by `;`.

/// Convert a multi-line shell script into a single command line.
///
/// Rules, applied per `\n`-separated line:
/// - a line starting with `#` (shebang or comment) is dropped, wherever it appears;
/// - an exactly empty line is dropped (whitespace-only lines are kept as-is);
/// - remaining lines are joined with `;` in their original order.
///
/// Returns an empty string when nothing survives. Never fails.
///
/// # Examples
/// ```
/// use shoes_ecs_model::flatten_script;
///
/// let script = "#!/bin/bash\n\n# comment\necho hi\nls -la";
/// assert_eq!(flatten_script(script), "echo hi;ls -la");
/// ```
pub fn flatten_script(script: &str) -> String {
    script
        .split('\n')
        .filter(|line| !line.starts_with('#'))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}
