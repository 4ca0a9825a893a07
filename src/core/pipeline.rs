//! Extraction entry points.
//!
//! Files are processed one at a time in the order the caller yields them.
//! Templates (files with the configured template extension) are rewritten to
//! script text first; every file is then parsed, walked, and merged into a
//! single catalog. The first file that fails to parse aborts the run.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use log::debug;
use swc_common::SourceMap;

use crate::core::catalog::{Catalog, CatalogBuilder, Header, po};
use crate::core::collect::comments::CommentPattern;
use crate::core::error::ExtractError;
use crate::core::extract::FileExtractor;
use crate::core::options::ExtractOptions;
use crate::core::parsers::script::{parse_source, syntax_for_path};
use crate::core::parsers::template::TemplatePreprocessor;

/// Extract a catalog from `(path, text)` pairs.
///
/// References use `path` exactly as given. Pass an ordered collection (a
/// `BTreeMap` or a sorted `Vec`) for stable output.
pub fn parse<P, S>(
    sources: impl IntoIterator<Item = (P, S)>,
    options: &ExtractOptions,
) -> Result<Catalog, ExtractError>
where
    P: AsRef<str>,
    S: Into<String>,
{
    let preprocessor = TemplatePreprocessor::new(&options.fn_names, &options.comment_prefix)?;
    let comment_pattern = CommentPattern::new(&options.comment_prefix)?;

    let mut builder = CatalogBuilder::new(initial_catalog(options)?, options.plural_slots());

    for (path, source) in sources {
        let path = path.as_ref();
        let is_template = is_template(path, &options.template_extension);
        let code = if is_template {
            preprocessor.to_script(&source.into())
        } else {
            source.into()
        };

        let parsed = parse_source(
            code,
            path,
            syntax_for_path(path, is_template),
            Arc::new(SourceMap::default()),
        )?;
        let found =
            FileExtractor::new(path, &parsed, &options.fn_names, &comment_pattern, &mut builder)
                .extract();

        debug!(
            "{path}: {found} translatable calls{}",
            if is_template { " (template)" } else { "" }
        );
    }

    Ok(builder.finish())
}

/// Extract a catalog and serialize it to PO text.
pub fn generate<P, S>(
    sources: impl IntoIterator<Item = (P, S)>,
    options: &ExtractOptions,
) -> Result<String, ExtractError>
where
    P: AsRef<str>,
    S: Into<String>,
{
    let catalog = parse(sources, options)?;
    Ok(po::write(&catalog))
}

/// A fresh catalog, or the existing one with its source comments cleared.
fn initial_catalog(options: &ExtractOptions) -> Result<Catalog, ExtractError> {
    let mut catalog = match &options.existing_po {
        Some(text) => {
            let mut catalog = po::parse(text)?;
            debug!("Merging into existing catalog with {} entries", catalog.len());
            catalog.reset_source_comments();
            if catalog.header.is_empty() {
                catalog.header = Header::new(options);
            }
            catalog
        }
        None => Catalog::new(Header::new(options)),
    };
    catalog.header.set_creation_date(Utc::now());
    Ok(catalog)
}

fn is_template(path: &str, template_extension: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == template_extension)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::catalog::MsgStr;
    use crate::core::catalog::header::CREATION_DATE;

    fn run(sources: &[(&str, &str)]) -> Catalog {
        parse(sources.iter().copied(), &ExtractOptions::default()).unwrap()
    }

    fn without_date(mut catalog: Catalog) -> Catalog {
        catalog.header.set(CREATION_DATE, "");
        catalog
    }

    // ============================================================
    // Properties
    // ============================================================

    #[test]
    fn test_identical_runs_are_equal_up_to_timestamp() {
        let sources = [
            ("a.js", "// L10n: greeting\ngettext('Hi');\nngettext('cat', 'cats', n);"),
            ("b.rtt", "<p>{{= pgettext \"menu\", \"Open\" }}</p>"),
        ];
        assert_eq!(without_date(run(&sources)), without_date(run(&sources)));
    }

    #[test]
    fn test_same_reference_recorded_once() {
        let catalog = run(&[("a.js", "gettext('x'); gettext('x'); obj.gettext('x');")]);
        assert_eq!(catalog.get("", "x").unwrap().references.render(), "a.js:1");
    }

    #[test]
    fn test_plural_call_promotes_earlier_singular() {
        let catalog = run(&[("a.js", "gettext('Cat');\nngettext('Cat', 'Cats', n);")]);

        let entry = catalog.get("", "Cat").unwrap();
        assert_eq!(entry.msgid_plural.as_deref(), Some("Cats"));
        assert_eq!(entry.msgstr, MsgStr::Plural(vec![String::new(), String::new()]));
    }

    #[test]
    fn test_plural_promotion_keeps_existing_translation() {
        let options = ExtractOptions {
            existing_po: Some("msgid \"Cat\"\nmsgstr \"Katze\"\n".to_string()),
            ..Default::default()
        };
        let catalog = parse([("a.js", "ngettext('Cat', 'Cats', n);")], &options).unwrap();

        let entry = catalog.get("", "Cat").unwrap();
        assert_eq!(
            entry.msgstr,
            MsgStr::Plural(vec!["Katze".to_string(), String::new()])
        );
    }

    #[test]
    fn test_comment_attaches_to_nearby_call_only() {
        let code = "// L10n: note\ngettext('First');\n\n\n\n\ngettext('Second');\n";
        let catalog = run(&[("a.js", code)]);

        assert_eq!(catalog.get("", "First").unwrap().extracted_comments.render(), "note");
        assert!(catalog.get("", "Second").unwrap().extracted_comments.is_empty());
    }

    #[test]
    fn test_template_reference_uses_template_line() {
        let template = "<html>\n<head><title>A rather long title text</title></head>\n<body>\n\n\
            <div class=\"header\">\n  <span>{{ user.name }}</span>\n</div>\n\n\
            {{// /Sign in button }}\n<button>{{= gettext \"Sign in\" }}</button>\n</body>\n";
        let catalog = run(&[("views/login.rtt", template)]);

        let entry = catalog.get("", "Sign in").unwrap();
        assert_eq!(entry.references.render(), "views/login.rtt:10");
        assert_eq!(entry.extracted_comments.render(), "Sign in button");
    }

    #[test]
    fn test_concatenation_resolved_to_single_msgid() {
        let catalog = run(&[("a.js", r#"gettext("Hello, " + "world");"#)]);
        assert!(catalog.get("", "Hello, world").is_some());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_context_isolates_entries() {
        let code = "// L10n: plain\ngettext('Save');\n// L10n: menu item\npgettext('menu', 'Save');\n";
        let catalog = run(&[("a.js", code)]);

        let plain = catalog.get("", "Save").unwrap();
        let menu = catalog.get("menu", "Save").unwrap();
        assert_eq!(plain.references.render(), "a.js:2");
        assert_eq!(plain.extracted_comments.render(), "plain");
        assert_eq!(menu.references.render(), "a.js:4");
        assert_eq!(menu.extracted_comments.render(), "menu item");
    }

    #[test]
    fn test_forwarded_call_recognized_like_member_call() {
        let forwarded = run(&[("a.js", "obj.gettext.call(obj, 'X');")]);
        let member = run(&[("a.js", "obj.gettext('X');")]);
        assert_eq!(without_date(forwarded), without_date(member));
    }

    // ============================================================
    // Runs
    // ============================================================

    #[test]
    fn test_syntax_error_aborts_run() {
        let err = parse(
            [("ok.js", "gettext('a');"), ("bad.js", "gettext('b';")],
            &ExtractOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::Syntax { ref file, line: 1, .. } if file == "bad.js"));
    }

    #[test]
    fn test_malformed_existing_catalog() {
        let options = ExtractOptions {
            existing_po: Some("msgid \"open".to_string()),
            ..Default::default()
        };
        let err = parse([("a.js", "")], &options).unwrap_err();
        assert!(matches!(err, ExtractError::Catalog(_)));
    }

    #[test]
    fn test_empty_msgid_keeps_header_intact() {
        let existing = "msgid \"\"\nmsgstr \"\"\n\"Plural-Forms: nplurals=3; plural=(n > 1);\\n\"\n";
        let options = ExtractOptions {
            existing_po: Some(existing.to_string()),
            ..Default::default()
        };
        let sources = [("a.js", "gettext('');\npgettext('', '');\ngettext('x');")];

        let first = generate(sources, &options).unwrap();
        assert_eq!(first.matches("msgid \"\"").count(), 1);

        let joined = ExtractOptions {
            existing_po: Some(first),
            ..Default::default()
        };
        let catalog = parse(sources, &joined).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("", "").is_none());
        assert_eq!(
            catalog.header.get("Plural-Forms"),
            Some("nplurals=3; plural=(n > 1);")
        );
    }

    #[test]
    fn test_existing_catalog_is_merged() {
        let existing = r#"msgid ""
msgstr ""
"Project-Id-Version: shop 2.0\n"
"POT-Creation-Date: 2020-01-01 00:00+0000\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

# keep me
#. stale note
#: old.js:99
msgid "Save"
msgstr "Speichern"

msgid "Removed"
msgstr "Entfernt"
"#;
        let options = ExtractOptions {
            existing_po: Some(existing.to_string()),
            project_id_version: Some("ignored".to_string()),
            ..Default::default()
        };
        let catalog = parse(
            [("new.js", "// L10n: toolbar\ngettext('Save');\ngettext('Open');")],
            &options,
        )
        .unwrap();

        assert_eq!(catalog.header.get("Project-Id-Version"), Some("shop 2.0"));
        assert_eq!(
            catalog.header.get("Plural-Forms"),
            Some("nplurals=2; plural=(n != 1);")
        );
        assert_ne!(catalog.header.get(CREATION_DATE), Some("2020-01-01 00:00+0000"));

        let save = catalog.get("", "Save").unwrap();
        assert_eq!(save.msgstr.first(), "Speichern");
        assert_eq!(save.translator_comments, vec!["keep me"]);
        assert_eq!(save.extracted_comments.render(), "toolbar");
        assert_eq!(save.references.render(), "new.js:2");

        let removed = catalog.get("", "Removed").unwrap();
        assert!(removed.references.is_empty());
        assert!(catalog.get("", "Open").is_some());
    }

    #[test]
    fn test_custom_names_apply_to_scripts_and_templates() {
        let options = ExtractOptions {
            fn_names: crate::core::options::FnNames::from_list("_,n_,p_,np_").unwrap(),
            comment_prefix: "TRANSLATORS:".to_string(),
            template_extension: "tpl".to_string(),
            ..Default::default()
        };
        let sources = BTreeMap::from([
            ("a.js", "// TRANSLATORS: hi\n_('Hello');\ngettext('Ignored');"),
            ("b.tpl", "{{= np_ 'ctx', 'one', 'many' }}"),
        ]);
        let catalog = parse(sources, &options).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("", "Hello").unwrap().extracted_comments.render(), "hi");
        assert!(catalog.get("ctx", "one").unwrap().is_plural());
    }

    #[test]
    fn test_generate_writes_po_text() {
        let options = ExtractOptions {
            project_id_version: Some("demo 1.0".to_string()),
            ..Default::default()
        };
        let text = generate(
            [("src/app.js", "// L10n: Page title\ngettext('Welcome');\nngettext('file', 'files', n);")],
            &options,
        )
        .unwrap();

        let text = text
            .lines()
            .filter(|line| !line.starts_with("\"POT-Creation-Date"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_snapshot!(text, @r#"
        msgid ""
        msgstr ""
        "Project-Id-Version: demo 1.0\n"
        "Report-Msgid-Bugs-To: \n"
        "PO-Revision-Date: YEAR-MO-DA HO:MI+ZONE\n"
        "Language-Team: LANGUAGE <ll@li.org>\n"
        "Language: \n"
        "MIME-Version: 1.0\n"
        "Content-Type: text/plain; charset=utf-8\n"
        "Content-Transfer-Encoding: 8bit\n"

        #. Page title
        #: src/app.js:2
        msgid "Welcome"
        msgstr ""

        #: src/app.js:3
        msgid "file"
        msgid_plural "files"
        msgstr[0] ""
        msgstr[1] ""
        "#);
    }
}
