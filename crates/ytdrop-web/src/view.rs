//! HTML rendering for the single form page.

use std::fmt::Write;
use ytdrop_core::listing::DirEntry;

/// Everything the page shows. At most one of `error`/`success` is set.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Submitted values, echoed back into the form.
    pub url: String,
    pub subdir: String,
    pub error: Option<String>,
    pub success: Option<String>,
    /// Downloader output shown under the banner.
    pub log: Option<String>,
    pub root: String,
    pub dirs: Vec<DirEntry>,
}

impl Page {
    pub fn new(root: impl Into<String>, dirs: Vec<DirEntry>) -> Self {
        Self {
            root: root.into(),
            dirs,
            ..Self::default()
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(HEAD);

        if let Some(error) = &self.error {
            let _ = writeln!(out, "<p class=\"banner error\">{}</p>", escape(error));
        }
        if let Some(success) = &self.success {
            let _ = writeln!(out, "<p class=\"banner success\">{}</p>", escape(success));
        }
        if let Some(log) = self.log.as_deref().filter(|l| !l.is_empty()) {
            let _ = writeln!(out, "<pre class=\"log\">{}</pre>", escape(log));
        }

        let _ = writeln!(
            out,
            r#"<form method="post" action="/download">
  <label>URL <input type="text" name="url" value="{url}" required autofocus></label>
  <label>Subdirectory <input type="text" name="subdir" value="{subdir}" list="subdirs" placeholder="e.g. music/live"></label>
  <button type="submit">Download</button>
</form>"#,
            url = escape(&self.url),
            subdir = escape(&self.subdir),
        );

        out.push_str("<datalist id=\"subdirs\">\n");
        for dir in &self.dirs {
            let _ = writeln!(out, "  <option value=\"{}\">", escape(&dir.path));
        }
        out.push_str("</datalist>\n");

        let _ = writeln!(out, "<h2>Existing folders in {}</h2>", escape(&self.root));
        if self.dirs.is_empty() {
            out.push_str("<p class=\"empty\">No subdirectories yet.</p>\n");
        } else {
            out.push_str("<ul class=\"dirs\">\n");
            for dir in &self.dirs {
                let _ = writeln!(
                    out,
                    "  <li style=\"margin-left: {}em\" title=\"{path}\">{}</li>",
                    dir.depth.saturating_sub(1) * 2,
                    escape(dir.name()),
                    path = escape(&dir.path),
                );
            }
            out.push_str("</ul>\n");
        }

        out.push_str(TAIL);
        out
    }
}

const HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>ytdrop</title>
<style>
  body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin: 0.5rem 0; }
  input[type=text] { width: 100%; padding: 0.4rem; box-sizing: border-box; }
  .banner { padding: 0.6rem; border-radius: 4px; }
  .error { background: #fde2e1; color: #8a1c1c; }
  .success { background: #e1f7e3; color: #1c5e26; }
  .log { background: #f4f4f4; padding: 0.6rem; overflow-x: auto; max-height: 24rem; }
  .dirs { list-style: none; padding-left: 0; font-family: monospace; }
</style>
</head>
<body>
<h1>ytdrop</h1>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, depth: usize) -> DirEntry {
        DirEntry {
            path: path.to_string(),
            depth,
        }
    }

    #[test]
    fn escape_special_chars() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain/path-1.2"), "plain/path-1.2");
    }

    #[test]
    fn empty_page_has_form_and_no_banner() {
        let html = Page::new("/download", Vec::new()).render();
        assert!(html.contains(r#"<form method="post" action="/download">"#));
        assert!(html.contains("No subdirectories yet."));
        assert!(!html.contains("class=\"banner"));
        assert!(!html.contains("<pre"));
    }

    #[test]
    fn error_and_log_are_escaped() {
        let mut page = Page::new("/download", Vec::new());
        page.error = Some("Download failed.".into());
        page.log = Some("<script>alert(1)</script>".into());
        page.url = "https://x/?a=1&b=\"2\"".into();
        let html = page.render();
        assert!(html.contains(r#"<p class="banner error">Download failed.</p>"#));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"value="https://x/?a=1&amp;b=&quot;2&quot;""#));
    }

    #[test]
    fn empty_log_is_not_rendered() {
        let mut page = Page::new("/download", Vec::new());
        page.success = Some("ok".into());
        page.log = Some(String::new());
        assert!(!page.render().contains("<pre"));
    }

    #[test]
    fn dirs_listed_with_indent_and_datalist() {
        let page = Page::new("/download", vec![entry("music", 1), entry("music/live", 2)]);
        let html = page.render();
        assert!(html.contains(r#"<option value="music/live">"#));
        assert!(html.contains(r#"<li style="margin-left: 0em" title="music">music</li>"#));
        assert!(html.contains(r#"<li style="margin-left: 2em" title="music/live">live</li>"#));
        assert!(html.contains("Existing folders in /download"));
    }
}
