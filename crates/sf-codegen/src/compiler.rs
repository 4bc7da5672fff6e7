//! Page compilation: stylesheet, markup and script assembled into a document.

use std::fmt::{self, Write};
use std::str::FromStr;

use sf_model::{Page, Project, ProjectType};

use crate::behavior;
use crate::escape::{EscapeMode, php_string};
use crate::markup::MarkupEmitter;
use crate::react;
use crate::style;

/// Document language used when none is configured.
pub const DEFAULT_LANG: &str = "fr";

/// Output backend for a compiled page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    /// Standalone HTML document.
    #[default]
    Html,
    /// HTML document behind a PHP preamble.
    Php,
    /// TSX page component stub.
    React,
}

impl Variant {
    /// Backend used when exporting pages of `project`.
    #[must_use]
    pub fn for_project(project: &Project) -> Self {
        match project.project_type {
            ProjectType::React => Self::React,
            ProjectType::Php => Self::Php,
            ProjectType::Html | ProjectType::Nodejs => Self::Html,
        }
    }

    /// Name as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Php => "php",
            Self::React => "react",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant '{0}', expected one of: html, php, react")]
pub struct ParseVariantError(String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "php" => Ok(Self::Php),
            "react" => Ok(Self::React),
            _ => Err(ParseVariantError(s.to_owned())),
        }
    }
}

/// Options shared by every page a compiler produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Value of the document's `lang` attribute.
    pub lang: String,
    /// Interpolation policy for user content.
    pub escape: EscapeMode,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_owned(),
            escape: EscapeMode::default(),
        }
    }
}

impl CompileOptions {
    /// Set the document language.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the escaping policy.
    #[must_use]
    pub fn with_escape(mut self, escape: EscapeMode) -> Self {
        self.escape = escape;
        self
    }
}

/// Head metadata for one page, with project SEO settings filling keyword and
/// image gaps.
#[derive(Debug)]
pub struct HeadMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub keywords: &'a [String],
    pub og_image: Option<&'a str>,
    pub canonical: Option<&'a str>,
}

impl<'a> HeadMeta<'a> {
    /// Resolve head values for `page`.
    ///
    /// Title and description are always the page's own. Empty keywords and a
    /// missing `og:image` fall back to the project's SEO defaults.
    #[must_use]
    pub fn resolve(page: &'a Page, project: &'a Project) -> Self {
        let seo = &project.settings.seo;
        Self {
            title: &page.title,
            description: &page.meta.description,
            keywords: if page.meta.keywords.is_empty() {
                &seo.keywords
            } else {
                &page.meta.keywords
            },
            og_image: non_empty(page.meta.og_image.as_deref())
                .or_else(|| non_empty(seo.og_image.as_deref())),
            canonical: non_empty(page.meta.canonical.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Generated pieces of one page, ready to be wrapped in a document.
#[derive(Debug)]
pub struct PageParts<'a> {
    pub lang: &'a str,
    pub escape: EscapeMode,
    pub head: HeadMeta<'a>,
    /// Generated stylesheet followed by the page's raw CSS.
    pub css: String,
    pub body: String,
    /// Generated script followed by the page's raw JavaScript.
    pub js: String,
}

/// Document wrapper for a compiled page.
///
/// Implementations decide how the head is written; the style, body and
/// script blocks are shared.
pub trait DocumentBackend {
    /// Write everything before `<!DOCTYPE html>`.
    fn preamble(_parts: &PageParts<'_>, _out: &mut String) {}

    /// Write the `<title>` and description elements.
    fn title_and_description(parts: &PageParts<'_>, out: &mut String);

    /// Write the keywords and social metadata. Default writes nothing.
    fn extra_meta(_parts: &PageParts<'_>, _out: &mut String) {}

    /// Write the whole document.
    fn write_document(parts: &PageParts<'_>, out: &mut String) {
        Self::preamble(parts, out);
        out.push_str("<!DOCTYPE html>\n");
        let _ = writeln!(out, r#"<html lang="{}">"#, parts.escape.html(parts.lang));
        out.push_str("<head>\n");
        out.push_str("    <meta charset=\"UTF-8\">\n");
        out.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        Self::title_and_description(parts, out);
        Self::extra_meta(parts, out);
        let _ = write!(out, "    <style>\n{}\n    </style>\n", parts.css);
        out.push_str("</head>\n<body>\n");
        let _ = write!(out, "{}\n    <script>\n{}\n    </script>\n", parts.body, parts.js);
        out.push_str("</body>\n</html>\n");
    }
}

/// Standalone HTML document.
pub struct HtmlDocument;

impl DocumentBackend for HtmlDocument {
    fn title_and_description(parts: &PageParts<'_>, out: &mut String) {
        let esc = parts.escape;
        let _ = writeln!(out, "    <title>{}</title>", esc.html(parts.head.title));
        let _ = writeln!(
            out,
            r#"    <meta name="description" content="{}">"#,
            esc.html(parts.head.description)
        );
    }

    fn extra_meta(parts: &PageParts<'_>, out: &mut String) {
        let esc = parts.escape;
        let keywords = parts.head.keywords.join(", ");
        let _ = writeln!(out, r#"    <meta name="keywords" content="{}">"#, esc.html(&keywords));
        if let Some(image) = parts.head.og_image {
            let _ = writeln!(out, r#"    <meta property="og:image" content="{}">"#, esc.html(image));
        }
        if let Some(canonical) = parts.head.canonical {
            let _ = writeln!(out, r#"    <link rel="canonical" href="{}">"#, esc.html(canonical));
        }
    }
}

/// HTML document behind a PHP block that assigns `$pageTitle` and
/// `$pageDescription`.
pub struct PhpDocument;

impl PhpDocument {
    fn echo(parts: &PageParts<'_>, var: &str) -> String {
        match parts.escape {
            EscapeMode::Verbatim => format!("<?php echo ${var}; ?>"),
            EscapeMode::Escaped => format!("<?php echo htmlspecialchars(${var}); ?>"),
        }
    }
}

impl DocumentBackend for PhpDocument {
    fn preamble(parts: &PageParts<'_>, out: &mut String) {
        out.push_str("<?php\n// SiteForge generated PHP page\n\n");
        let _ = writeln!(out, "$pageTitle = {};", php_string(parts.head.title));
        let _ = writeln!(out, "$pageDescription = {};", php_string(parts.head.description));
        out.push_str("\n?>\n");
    }

    fn title_and_description(parts: &PageParts<'_>, out: &mut String) {
        let _ = writeln!(out, "    <title>{}</title>", Self::echo(parts, "pageTitle"));
        let _ = writeln!(
            out,
            r#"    <meta name="description" content="{}">"#,
            Self::echo(parts, "pageDescription")
        );
    }
}

/// Compiles pages into documents.
///
/// Stateless apart from its options; one instance can serve any number of
/// pages, from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct PageCompiler {
    options: CompileOptions,
}

impl PageCompiler {
    /// Create a compiler with the given options.
    #[must_use]
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `page` of `project` with the given backend.
    pub fn compile(&self, page: &Page, project: &Project, variant: Variant) -> String {
        tracing::debug!(
            path = %page.path,
            %variant,
            components = page.components.len(),
            "Compiling page"
        );
        match variant {
            Variant::Html => self.document::<HtmlDocument>(page, project),
            Variant::Php => self.document::<PhpDocument>(page, project),
            Variant::React => react::page_module(page, self.options.escape),
        }
    }

    /// Compile with the backend selected by the project's type.
    pub fn compile_for_project(&self, page: &Page, project: &Project) -> String {
        self.compile(page, project, Variant::for_project(project))
    }

    /// Generate the pieces shared by all document backends.
    pub fn parts<'a>(&'a self, page: &'a Page, project: &'a Project) -> PageParts<'a> {
        let escape = self.options.escape;
        PageParts {
            lang: &self.options.lang,
            escape,
            head: HeadMeta::resolve(page, project),
            css: join_raw(style::stylesheet(&page.components, escape), &page.styles),
            body: MarkupEmitter::new(escape).render(&page.components),
            js: join_raw(behavior::script(&page.components, escape), &page.scripts),
        }
    }

    fn document<B: DocumentBackend>(&self, page: &Page, project: &Project) -> String {
        let parts = self.parts(page, project);
        let mut out = String::with_capacity(
            parts.css.len() + parts.body.len() + parts.js.len() + 512,
        );
        B::write_document(&parts, &mut out);
        out
    }
}

/// Compile with default options.
pub fn compile(page: &Page, project: &Project, variant: Variant) -> String {
    PageCompiler::default().compile(page, project, variant)
}

fn join_raw(mut generated: String, raw: &str) -> String {
    generated.push('\n');
    generated.push_str(raw);
    generated
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::PageCompiler: Send, Sync);
    use pretty_assertions::assert_eq;
    use sf_model::Component;

    use super::*;

    fn home() -> Page {
        let mut page = Page::new("/", "Home")
            .with_component(Component::new("h1", "heading").with_prop("content", "Hi"));
        page.meta.description = "d".to_owned();
        page.meta.keywords = vec!["a".to_owned(), "b".to_owned()];
        page
    }

    #[test]
    fn test_variant_for_project() {
        assert_eq!(Variant::for_project(&Project::new("p", ProjectType::Html)), Variant::Html);
        assert_eq!(Variant::for_project(&Project::new("p", ProjectType::Nodejs)), Variant::Html);
        assert_eq!(Variant::for_project(&Project::new("p", ProjectType::Php)), Variant::Php);
        assert_eq!(Variant::for_project(&Project::new("p", ProjectType::React)), Variant::React);
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("PHP".parse::<Variant>(), Ok(Variant::Php));
        assert_eq!(
            "xml".parse::<Variant>().unwrap_err().to_string(),
            "unknown variant 'xml', expected one of: html, php, react"
        );
    }

    #[test]
    fn test_html_head() {
        let html = compile(&home(), &Project::default(), Variant::Html);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n"));
        assert!(html.contains("    <title>Home</title>\n"));
        assert!(html.contains(r#"<meta name="description" content="d">"#));
        assert!(html.contains(r#"<meta name="keywords" content="a, b">"#));
        assert!(!html.contains("og:image"));
        assert!(!html.contains("canonical"));
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_html_optional_meta() {
        let mut page = home();
        page.meta.og_image = Some("/og.png".to_owned());
        page.meta.canonical = Some("https://example.com/".to_owned());
        let html = compile(&page, &Project::default(), Variant::Html);
        assert!(html.contains(r#"<meta property="og:image" content="/og.png">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/">"#));
    }

    #[test]
    fn test_empty_optional_meta_is_omitted() {
        let mut page = home();
        page.meta.og_image = Some(String::new());
        let html = compile(&page, &Project::default(), Variant::Html);
        assert!(!html.contains("og:image"));
    }

    #[test]
    fn test_raw_styles_and_scripts_follow_generated() {
        let mut page = home();
        page.styles = ".custom { color: red; }".to_owned();
        page.scripts = "console.log('custom');".to_owned();
        let html = compile(&page, &Project::default(), Variant::Html);
        let generated_css = html.find("#h1 {").unwrap();
        let custom_css = html.find(".custom { color: red; }").unwrap();
        let runtime = html.find("function validateForm").unwrap();
        let custom_js = html.find("console.log('custom');").unwrap();
        assert!(generated_css < custom_css);
        assert!(runtime < custom_js);
        assert!(custom_css < html.find("</style>").unwrap());
        assert!(custom_js < html.find("</script>").unwrap());
    }

    #[test]
    fn test_project_seo_fills_keywords_and_image() {
        let mut project = Project::new("Site", ProjectType::Html);
        project.settings.seo.title = "Site title".to_owned();
        project.settings.seo.description = "Site description".to_owned();
        project.settings.seo.keywords = vec!["site".to_owned()];
        project.settings.seo.og_image = Some("/site.png".to_owned());

        let html = compile(&Page::new("/", ""), &project, Variant::Html);
        assert!(html.contains("<title></title>"));
        assert!(html.contains(r#"<meta name="description" content="">"#));
        assert!(!html.contains("Site title"));
        assert!(!html.contains("Site description"));
        assert!(html.contains(r#"<meta name="keywords" content="site">"#));
        assert!(html.contains(r#"content="/site.png""#));

        let html = compile(&home(), &project, Variant::Html);
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains(r#"<meta name="keywords" content="a, b">"#));
    }

    #[test]
    fn test_lang_option() {
        let compiler = PageCompiler::new(CompileOptions::default().with_lang("en"));
        let html = compiler.compile(&home(), &Project::default(), Variant::Html);
        assert!(html.contains("<html lang=\"en\">"));
    }

    #[test]
    fn test_php_document() {
        let mut page = home();
        page.title = "It's home".to_owned();
        let php = compile(&page, &Project::default(), Variant::Php);
        assert!(php.starts_with("<?php\n"));
        assert!(php.contains(r"$pageTitle = 'It\'s home';"));
        assert!(php.contains("$pageDescription = 'd';"));
        assert!(php.contains("?>\n<!DOCTYPE html>"));
        assert!(php.contains("<title><?php echo $pageTitle; ?></title>"));
        assert!(php.contains(r#"<meta name="description" content="<?php echo $pageDescription; ?>">"#));
        assert!(php.contains(r#"<h1 id="h1" class="heading-component">Hi</h1>"#));
        assert!(!php.contains("require_once"));
    }

    #[test]
    fn test_php_escaped_mode_uses_htmlspecialchars() {
        let compiler = PageCompiler::new(CompileOptions::default().with_escape(EscapeMode::Escaped));
        let php = compiler.compile(&home(), &Project::default(), Variant::Php);
        assert!(php.contains("<?php echo htmlspecialchars($pageTitle); ?>"));
    }

    #[test]
    fn test_react_variant() {
        let mut page = home();
        page.name = "Home".to_owned();
        let tsx = compile(&page, &Project::default(), Variant::React);
        assert!(tsx.starts_with("import React from 'react';"));
        assert!(tsx.contains("const HomePage: React.FC"));
        assert!(tsx.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_escaped_mode_escapes_head() {
        let mut page = home();
        page.title = "<script>x</script>".to_owned();
        let compiler = PageCompiler::new(CompileOptions::default().with_escape(EscapeMode::Escaped));
        let html = compiler.compile(&page, &Project::default(), Variant::Html);
        assert!(html.contains("<title>&lt;script&gt;x&lt;/script&gt;</title>"));
    }
}
