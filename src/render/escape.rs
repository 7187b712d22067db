//! Context-aware escaping for payloads embedded into the page.
//!
//! Each function appends to an output buffer so the renderer can build the
//! whole document in one allocation.

/// Append stylesheet text for a `<style>` element.
///
/// `</style` in any letter case becomes `<\/style`.
pub fn push_style(out: &mut String, text: &str) {
    push_with_breaks(out, text, "<\\", |rest| starts_with_ignore_case(rest, b"/style"));
}

/// Append script text for a `<script>` element.
///
/// The `<` of `</script` (any letter case) and of `<!--` becomes `\x3C`, so
/// the text can neither close the element nor switch the parser into the
/// escaped script state. Those sequences can only appear inside string,
/// template or regular expression literals, where `\x3C` reads back as `<`
/// (also under the `u` flag).
pub fn push_script(out: &mut String, text: &str) {
    push_with_breaks(out, text, "\\x3C", |rest| {
        starts_with_ignore_case(rest, b"/script") || rest.starts_with(b"!--")
    });
}

/// Append a JSON document as a JavaScript expression inside `<script>`.
///
/// `<`, `>`, `&`, U+2028 and U+2029 become `\u` escapes. In valid JSON they
/// only occur inside strings, so the result still parses to the same value.
pub fn push_json(out: &mut String, json: &str) {
    let mut last = 0;
    for (i, c) in json.char_indices() {
        let replacement = match c as u32 {
            0x3c => "\\u003c",
            0x3e => "\\u003e",
            0x26 => "\\u0026",
            0x2028 => "\\u2028",
            0x2029 => "\\u2029",
            _ => continue,
        };
        out.push_str(&json[last..i]);
        out.push_str(replacement);
        last = i + c.len_utf8();
    }
    out.push_str(&json[last..]);
}

/// Replace every `<` whose following bytes match `breaks` with `lt`
fn push_with_breaks(out: &mut String, text: &str, lt: &str, breaks: impl Fn(&[u8]) -> bool) {
    let bytes = text.as_bytes();
    let mut last = 0;
    for (i, _) in text.match_indices('<') {
        if breaks(&bytes[i + 1..]) {
            out.push_str(&text[last..i]);
            out.push_str(lt);
            last = i + 1;
        }
    }
    out.push_str(&text[last..]);
}

fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(text: &str) -> String {
        let mut out = String::new();
        push_style(&mut out, text);
        out
    }

    fn script(text: &str) -> String {
        let mut out = String::new();
        push_script(&mut out, text);
        out
    }

    fn json(text: &str) -> String {
        let mut out = String::new();
        push_json(&mut out, text);
        out
    }

    #[test]
    fn test_style_close_tag() {
        assert_eq!(style("a{}</style><b>"), "a{}<\\/style><b>");
        assert_eq!(style("</STYLE>"), "<\\/STYLE>");
        assert_eq!(style("a > b { }"), "a > b { }");
    }

    #[test]
    fn test_style_leaves_other_tags() {
        assert_eq!(style("</script>"), "</script>");
        assert_eq!(style("<"), "<");
    }

    #[test]
    fn test_script_close_tag() {
        assert_eq!(
            script("var s = \"</script><script>alert(1)\";"),
            "var s = \"\\x3C/script><script>alert(1)\";"
        );
        assert_eq!(script("x</ScRiPt"), "x\\x3C/ScRiPt");
    }

    #[test]
    fn test_script_comment_open() {
        assert_eq!(script("a = \"<!-- b\""), "a = \"\\x3C!-- b\"");
        assert_eq!(script("a <! b"), "a <! b");
    }

    #[test]
    fn test_script_regex_literals_stay_valid() {
        // identity escapes such as `\!` are rejected in `u` mode
        assert_eq!(script("var re=/<!--/u;"), "var re=/\\x3C!--/u;");
        assert_eq!(script("var re=/<\\/script/iu;"), "var re=/<\\/script/iu;");
        assert_eq!(script("var t=`</script>`;"), "var t=`\\x3C/script>`;");
    }

    #[test]
    fn test_script_unchanged_when_clean() {
        let src = "if (a < b && c > d) { return \"</div>\"; }";
        assert_eq!(script(src), src);
    }

    #[test]
    fn test_json_html_sensitive_chars() {
        assert_eq!(
            json(r#"{"comment":"</script>&"}"#),
            "{\"comment\":\"\\u003c/script\\u003e\\u0026\"}"
        );
    }

    #[test]
    fn test_json_line_separators() {
        let input = format!("\"a{}b{}c\"", '\u{2028}', '\u{2029}');
        assert_eq!(json(&input), "\"a\\u2028b\\u2029c\"");
    }

    #[test]
    fn test_json_parses_to_same_value() {
        let value = serde_json::json!({
            "comment": "x < y && y > z </script><!-- 用户",
        });
        let raw = serde_json::to_string(&value).unwrap();
        let escaped = json(&raw);
        assert!(!escaped.contains('<'));
        let back: serde_json::Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        assert_eq!(json("\"宠物名\""), "\"宠物名\"");
    }
}
