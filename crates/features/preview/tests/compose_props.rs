use lpad_domain::Fragments;
use lpad_preview::{PreviewOptions, ScriptErrorPolicy, compose};
use proptest::prelude::*;

fn policy() -> impl Strategy<Value = ScriptErrorPolicy> {
    prop_oneof![Just(ScriptErrorPolicy::Console), Just(ScriptErrorPolicy::Overlay)]
}

proptest! {
    #[test]
    fn markup_and_style_are_embedded_verbatim(
        html in "\\PC{0,64}",
        css in "\\PC{0,64}",
        policy in policy(),
    ) {
        let doc = compose(&Fragments::new(html.clone(), css.clone(), ""), &PreviewOptions::new(policy));

        let expected_body = format!("<body>\n{html}\n<script>");
        let expected_style = format!("<style>{css}</style>");
        prop_assert!(doc.as_str().contains(&expected_style));
        prop_assert!(doc.as_str().contains(&expected_body));
    }

    #[test]
    fn script_can_never_close_its_element(js in ".{0,96}", policy in policy()) {
        let doc = compose(&Fragments::new("", "", js), &PreviewOptions::new(policy));
        let lower = doc.as_str().to_ascii_lowercase();

        prop_assert_eq!(lower.matches("</script").count(), 1);
        prop_assert_eq!(lower.matches("<script").count(), 1);
    }

    #[test]
    fn adversarial_script_terminators_stay_escaped(
        prefix in "[a-z ;]{0,8}",
        tag in prop_oneof![Just("</script>"), Just("</SCRIPT >"), Just("<!--"), Just("<script>")],
    ) {
        let js = format!("{prefix}{tag}{prefix}");
        let doc = compose(&Fragments::new("", "", js), &PreviewOptions::default());

        prop_assert_eq!(doc.as_str().to_ascii_lowercase().matches("</script").count(), 1);
        prop_assert!(!doc.as_str().contains("<!--"));
    }
}
