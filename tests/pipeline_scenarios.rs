//! End-to-end scenarios through the standard pipeline

use rstest::rstest;
use xloc::lexing::LexError;
use xloc::parsing::ParseError;
use xloc::pipeline::Pipeline;
use xloc::testing::assert_locators;
use xloc::TransformError;

#[test]
fn empty_input_yields_no_locators() {
    let records = xloc::locate("").unwrap();
    assert_locators(&records).empty();
    assert_eq!(Pipeline::standard().run("").unwrap(), "");
}

#[test]
fn single_tag() {
    let records = xloc::locate("button").unwrap();
    assert_locators(&records).count(1).record(0, |r| {
        r.id("button_PushButtonQT")
            .root()
            .meta_keys(&["archetype", "visible"])
            .archetype("PushButtonQT")
            .meta("visible", 1)
    });
}

#[test]
fn descendant_shorthand_with_attribute() {
    let records = xloc::locate("//button[@name='submit']").unwrap();
    assert_locators(&records)
        .count(2)
        .chained()
        .record(0, |r| r.id("any_QWidget").archetype("QWidget"))
        .last(|r| {
            r.id_ends_with("_button_PushButtonQT_name_submit")
                .meta("name", "submit")
        });
}

#[test]
fn login_form_chain() {
    let records =
        xloc::locate("/form/textfield[@name='username']/button[@name='submit']").unwrap();
    assert_locators(&records)
        .count(3)
        .chained()
        .ids_are(&[
            "form_ModuleQT",
            "form_ModuleQT_textfield_TextFieldQT_name_username",
            "form_ModuleQT_textfield_TextFieldQT_name_username_button_PushButtonQT_name_submit",
        ]);
}

#[test]
fn position_lands_in_metadata_only() {
    let records = xloc::locate("row[2]").unwrap();
    assert_locators(&records).count(1).record(0, |r| {
        r.id("row_QWidget")
            .meta("occurrence", 2)
            .meta_keys(&["archetype", "occurrence", "visible"])
    });
}

#[test]
fn unterminated_literal_fails_whole_run() {
    let err = Pipeline::standard().run("book[@id='1").unwrap_err();
    assert_eq!(
        err,
        TransformError::Lex(LexError::UnterminatedLiteral { offset: 9 })
    );
}

#[test]
fn declarations_for_login_form() {
    let output = Pipeline::standard()
        .run("/form/textfield[@name='username']/button[@name='submit']")
        .unwrap();
    insta::assert_snapshot!(output.trim_end(), @r#"
    form_ModuleQT = {
        "archetype": "ModuleQT",
        "visible": 1
    }
    form_ModuleQT_textfield_TextFieldQT_name_username = {
        "archetype": "TextFieldQT",
        "name": "username",
        "visible": 1,
        "container": form_ModuleQT
    }
    form_ModuleQT_textfield_TextFieldQT_name_username_button_PushButtonQT_name_submit = {
        "archetype": "PushButtonQT",
        "name": "submit",
        "visible": 1,
        "container": form_ModuleQT_textfield_TextFieldQT_name_username
    }
    "#);
}

#[rstest]
#[case("button", "PushButtonQT")]
#[case("mybutton", "PushButtonQT")]
#[case("xbuttony", "PushButtonQT")]
#[case("widgetx", "QWidget")]
#[case("container", "ScrollViewQT")]
#[case("listview", "ScrollViewQT")]
#[case("sidepanel2", "ScrollViewQT")]
#[case("volumeslider", "SliderQT")]
#[case("titlelabel", "LabelQT")]
#[case("countrycombobox", "ComboBoxQT")]
#[case("termscheckbox", "CheckBoxQT")]
#[case("radiobutton", "PushButtonQT")]
#[case("searchtextbox", "TextFieldQT")]
#[case("Form", "ModuleQT")]
fn archetype_of_tag(#[case] tag: &str, #[case] archetype: &str) {
    let records = xloc::locate(tag).unwrap();
    assert_locators(&records).record(0, |r| r.archetype(archetype));
}

#[rstest]
#[case("child::button", "button_PushButtonQT")]
#[case("*", "any_QWidget")]
#[case("ns:button", "ns_button_PushButtonQT")]
#[case("item[@id='x']", "item_QWidget_id_x")]
#[case("item[@label=\"two words\"]", "item_QWidget_label_two_words")]
#[case("book[price>35]", "book_QWidget_price_35")]
#[case("item[@id='a' and @kind='b']", "item_QWidget_id_a_kind_b")]
#[case("row[@id='r' and 4]", "row_QWidget_id_r")]
fn identifier_of_expression(#[case] expr: &str, #[case] id: &str) {
    let records = xloc::locate(expr).unwrap();
    assert_locators(&records).last(|r| r.id(id));
}

#[rstest]
#[case("/", 1)]
#[case("form/[", 5)]
#[case("row[@id='x'", 11)]
#[case("row[@id]", 7)]
#[case("row[/]", 4)]
fn parse_failures_carry_offsets(#[case] expr: &str, #[case] offset: usize) {
    let err = xloc::locate(expr).unwrap_err();
    assert!(matches!(err, TransformError::Parse(_)), "{err:?}");
    assert_eq!(err.offset(), Some(offset));
}

#[test]
fn open_predicate_reports_missing_bracket() {
    let err = xloc::parse_expression("row[@id='x'").unwrap_err();
    assert!(matches!(
        err,
        TransformError::Parse(ParseError::ExpectedClosingBracket { offset: 11, .. })
    ));
}

#[test]
fn segment_pipeline_matches_full_grammar_on_simple_paths() {
    let expr = "/form/textfield[@name='username']/button[@name='submit']";
    let full = Pipeline::standard().run(expr).unwrap();
    let segments = Pipeline::segments().run(expr).unwrap();
    assert_eq!(full, segments);
}
