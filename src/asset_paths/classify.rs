/// Substitution strategy chosen for a file in the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    /// HTML documents; relativised and given the runtime bootstrap.
    Markup,
    /// Executable script; placeholders become runtime variable references.
    Script,
    /// Page-data JSON, resolved in the browser instead of at build time.
    PageData,
    /// Any other text asset; relativised like markup.
    Text,
    /// Binary or unrecognised content, never touched.
    Binary,
}

const MARKUP_EXTENSIONS: &[&str] = &["htm", "html"];

const SCRIPT_EXTENSIONS: &[&str] = &["cjs", "js", "mjs"];

/// Extensions treated as text, mirroring the widely used `text-extensions` list.
///
/// Kept sorted so lookups can use binary search.
const TEXT_EXTENSIONS: &[&str] = &[
    "ada", "adb", "ads", "applescript", "as", "asc", "ascii", "ascx", "asm", "asmx", "asp",
    "aspx", "atom", "au3", "awk", "bas", "bash", "bashrc", "bat", "bbcolors", "bcp", "bdsgroup",
    "bdsproj", "bib", "bowerrc", "c", "cbl", "cc", "cfc", "cfg", "cfm", "cfml", "cgi", "cjs",
    "clj", "cljs", "cls", "cmake", "cmd", "cnf", "cob", "code-snippets", "coffee",
    "coffeekup", "conf", "cp", "cpp", "cpt", "cpy", "crt", "cs", "csh", "cson", "csproj", "csr",
    "css", "csslintrc", "csv", "ctl", "curlrc", "cxx", "d", "dart", "dfm", "diff", "dof", "dpk",
    "dpr", "dproj", "dtd", "eco", "editorconfig", "ejs", "el", "elm", "emacs", "eml", "ent",
    "erb", "erl", "eslintignore", "eslintrc", "ex", "exs", "f", "f03", "f77", "f90", "f95",
    "fish", "for", "fpp", "frm", "fs", "fsproj", "fsx", "ftn", "gemrc", "gemspec",
    "gitattributes", "gitconfig", "gitignore", "gitkeep", "gitmodules", "go", "gpp", "gradle",
    "graphql", "groovy", "groupproj", "grunit", "gtmpl", "gvimrc", "h", "haml", "hbs", "hgignore",
    "hh", "hpp", "hrl", "hs", "hta", "htaccess", "htc", "htm", "html", "htpasswd", "hxx", "iced",
    "iml", "inc", "inf", "info", "ini", "ino", "int", "irbrc", "itcl", "itermcolors", "itk",
    "jade", "java", "jhtm", "jhtml", "js", "jscsrc", "jshintignore", "jshintrc", "json",
    "json5", "jsonld", "jsp", "jspx", "jsx", "ksh", "less", "lhs", "lisp", "log", "ls", "lsp",
    "lua", "m", "m4", "mak", "map", "markdown", "master", "md", "mdown", "mdwn", "mdx", "metadata",
    "mht", "mhtml", "mjs", "mk", "mkd", "mkdn", "mkdown", "ml", "mli", "mm", "mxml", "nfm", "nfo",
    "noon", "npmignore", "npmrc", "nuspec", "nvmrc", "ops", "pas", "pasm", "patch", "pbxproj",
    "pch", "pem", "pg", "php", "php3", "php4", "php5", "phpt", "phtml", "pir", "pl", "pm", "pmc",
    "pod", "pot", "prettierrc", "properties", "props", "pt", "pug", "purs", "py", "pyx", "r",
    "rake", "rb", "rbw", "rc", "rdoc", "rdoc_options", "resx", "rexx", "rhtml", "rjs", "rlib",
    "ron", "rs", "rss", "rst", "rtf", "rvmrc", "rxml", "s", "sass", "scala", "scm", "scss",
    "seestyle", "sh", "shtml", "sln", "sls", "spec", "sql", "sqlite", "sqlproj", "srt", "ss",
    "sss", "st", "strings", "sty", "styl", "stylus", "sub", "sublime-build",
    "sublime-commands", "sublime-completions", "sublime-keymap", "sublime-macro",
    "sublime-menu", "sublime-project", "sublime-settings", "sublime-workspace", "sv", "svc",
    "svg", "swift", "t", "tcl", "tcsh", "terminal", "tex", "text", "textile", "tg", "tk", "tmLanguage",
    "tmpl", "tmTheme", "toml", "tpl", "ts", "tsv", "tsx", "tt", "tt2", "ttml", "twig", "txt", "v",
    "vb", "vbproj", "vbs", "vcproj", "vcxproj", "vh", "vhd", "vhdl", "vim", "viminfo", "vimrc",
    "vm", "vue", "webapp", "webmanifest", "wsc", "x-php", "xaml", "xht", "xhtml", "xml", "xs",
    "xsd", "xsl", "xslt", "y", "yaml", "yml", "zsh", "zshrc",
];

/// Classify a file by its location relative to the output root.
///
/// `page_data_dir` names the top-level directory whose JSON documents are left for the
/// browser-side resolver.
pub fn classify(relative_path: &str, page_data_dir: &str) -> FileClass {
    let normalised = relative_path.replace('\\', "/");
    let trimmed = normalised.trim_start_matches("./").trim_start_matches('/');
    let file_name = trimmed.rsplit('/').next().unwrap_or(trimmed);

    let Some(extension) = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
    else {
        return FileClass::Binary;
    };

    if MARKUP_EXTENSIONS.contains(&extension.as_str()) {
        return FileClass::Markup;
    }
    if SCRIPT_EXTENSIONS.contains(&extension.as_str()) {
        return FileClass::Script;
    }
    if extension == "json" && is_page_data(trimmed, page_data_dir) {
        return FileClass::PageData;
    }
    if is_text_extension(&extension) {
        return FileClass::Text;
    }

    FileClass::Binary
}

fn is_page_data(relative_path: &str, page_data_dir: &str) -> bool {
    let dir = page_data_dir.trim_matches('/');
    !dir.is_empty()
        && relative_path
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn is_text_extension(extension: &str) -> bool {
    TEXT_EXTENSIONS
        .binary_search_by(|candidate| cmp_ignore_case(candidate, extension))
        .is_ok()
}

fn cmp_ignore_case(left: &str, right: &str) -> std::cmp::Ordering {
    left.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(right.bytes().map(|b| b.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_extensions_are_sorted_case_insensitively() {
        for pair in TEXT_EXTENSIONS.windows(2) {
            assert_eq!(
                cmp_ignore_case(pair[0], pair[1]),
                std::cmp::Ordering::Less,
                "{} should sort before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn classifies_markup_and_scripts() {
        assert_eq!(classify("index.html", "page-data"), FileClass::Markup);
        assert_eq!(classify("legacy/PAGE.HTM", "page-data"), FileClass::Markup);
        assert_eq!(classify("app-123.js", "page-data"), FileClass::Script);
        assert_eq!(classify("chunks/worker.mjs", "page-data"), FileClass::Script);
    }

    #[test]
    fn separates_page_data_from_other_json() {
        assert_eq!(
            classify("page-data/blog/page-data.json", "page-data"),
            FileClass::PageData
        );
        assert_eq!(classify("manifest.json", "page-data"), FileClass::Text);
        assert_eq!(classify("static/page-data/x.json", "page-data"), FileClass::Text);
        assert_eq!(classify("page-data-extra/x.json", "page-data"), FileClass::Text);
    }

    #[test]
    fn recognises_common_text_assets() {
        for path in ["styles.css", "sitemap.xml", "icon.svg", "app.js.map", "robots.txt"] {
            assert_eq!(classify(path, "page-data"), FileClass::Text, "{path}");
        }
        assert_eq!(classify("app.webmanifest", "page-data"), FileClass::Text);
    }

    #[test]
    fn treats_unknown_and_binary_files_as_binary() {
        for path in ["logo.png", "font.woff2", "CNAME", "archive.tar.gz", "noext."] {
            assert_eq!(classify(path, "page-data"), FileClass::Binary, "{path}");
        }
    }
}
