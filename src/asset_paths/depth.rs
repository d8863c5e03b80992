/// Compute the prefix that climbs from a file's directory back to the output root.
///
/// `relative_path` is the file's location relative to the output root, using forward slashes
/// (backslashes are accepted and normalised). The file name itself does not count as a level,
/// so a file directly under the root yields `./` and every extra directory adds one `../`.
pub fn relative_prefix(relative_path: &str) -> String {
    let normalised = relative_path.replace('\\', "/");
    let segments = normalised
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .count();

    let depth = segments.saturating_sub(1);
    if depth > 0 {
        "../".repeat(depth)
    } else {
        "./".to_string()
    }
}
