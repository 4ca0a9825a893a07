use anyhow::Result;
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_extract_project() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        r#"// L10n: Window title
const title = gettext("Inbox");
const label = ngettext("message", "messages", count);
"#,
    )?;
    test.write_file(
        "views/menu.rtt",
        "<ul>\n  <li>{{= pgettext \"menu\", \"Open\" }}</li>\n</ul>\n",
    )?;
    test.write_file("node_modules/lib/index.js", "gettext('Vendored');")?;
    test.write_file("README.md", "gettext('Docs');")?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 3 messages from 2 files into messages.pot

    ----- stderr -----
    ");

    assert_snapshot!(test.read_catalog("messages.pot")?, @r#"
    msgid ""
    msgstr ""
    "Project-Id-Version: PACKAGE VERSION\n"
    "Report-Msgid-Bugs-To: \n"
    "PO-Revision-Date: YEAR-MO-DA HO:MI+ZONE\n"
    "Language-Team: LANGUAGE <ll@li.org>\n"
    "Language: \n"
    "MIME-Version: 1.0\n"
    "Content-Type: text/plain; charset=utf-8\n"
    "Content-Transfer-Encoding: 8bit\n"

    #. Window title
    #: src/app.js:2
    msgid "Inbox"
    msgstr ""

    #: src/app.js:3
    msgid "message"
    msgid_plural "messages"
    msgstr[0] ""
    msgstr[1] ""

    #: views/menu.rtt:2
    msgctxt "menu"
    msgid "Open"
    msgstr ""
    "#);

    Ok(())
}

#[test]
fn test_extract_paths_and_output_flags() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "gettext('A');")?;
    test.write_file("lib/b.js", "gettext('B');")?;

    let output = test
        .extract_command()
        .args(["lib", "-o", "po/lib.pot", "--project-id-version", "lib 2.1"])
        .output()?;
    assert!(output.status.success());

    let catalog = test.read_file("po/lib.pot")?;
    assert!(catalog.contains("\"Project-Id-Version: lib 2.1\\n\""));
    assert!(catalog.contains("msgid \"B\""));
    assert!(!catalog.contains("msgid \"A\""));
    assert!(!test.root().join("messages.pot").exists());

    Ok(())
}

#[test]
fn test_extract_join_existing_keeps_translations() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "gettext('Save');\ngettext('Open');")?;
    test.write_file(
        "messages.pot",
        r#"msgid ""
msgstr ""
"Project-Id-Version: shop 1.0\n"

#: old.js:1
msgid "Save"
msgstr "Speichern"
"#,
    )?;

    let output = test.extract_command().arg("--join-existing").output()?;
    assert!(output.status.success());

    let catalog = test.read_file("messages.pot")?;
    assert!(catalog.contains("\"Project-Id-Version: shop 1.0\\n\""));
    assert!(catalog.contains("#: src/a.js:1\nmsgid \"Save\"\nmsgstr \"Speichern\""));
    assert!(catalog.contains("msgid \"Open\""));
    assert!(!catalog.contains("old.js"));

    Ok(())
}

#[test]
fn test_extract_without_join_replaces_catalog() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "gettext('Save');")?;
    test.write_file("messages.pot", "msgid \"Old\"\nmsgstr \"Alt\"\n")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success());
    assert!(!test.read_file("messages.pot")?.contains("Old"));

    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".gleanrc.json",
        r#"{
  "includes": ["app"],
  "output": "locale/app.pot",
  "fnNames": { "gettext": "_" },
  "commentPrefix": "TRANSLATORS:"
}"#,
    )?;
    test.write_file("app/main.js", "// TRANSLATORS: greeting\n_('Hi');\ngettext('Skipped');")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success());

    let catalog = test.read_file("locale/app.pot")?;
    assert!(catalog.contains("#. greeting\n#: app/main.js:2\nmsgid \"Hi\""));
    assert!(!catalog.contains("Skipped"));

    Ok(())
}

#[test]
fn test_extract_syntax_error_fails() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "gettext('ok');")?;
    test.write_file("src/b.js", "gettext('broken';")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: src/b.js:1:"), "stderr: {stderr}");
    assert!(!test.root().join("messages.pot").exists());

    Ok(())
}

#[test]
fn test_extract_invalid_config_fails() -> Result<()> {
    let test = CliTest::with_file(".gleanrc.json", r#"{ "pluralFormCount": 0 }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("pluralFormCount"));

    Ok(())
}

#[test]
fn test_extract_missing_include_warns() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.extract_command().arg("missing"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 0 messages from 0 files into messages.pot

    ----- stderr -----
    warning: Include path does not exist: missing
    ");

    Ok(())
}
