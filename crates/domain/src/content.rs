use pulldown_cmark::{html, Options, Parser};

const FORBIDDEN_TAGS: [&str; 1] = ["style"];
const FORBIDDEN_ATTRS: [&str; 4] = ["style", "class", "aria-hidden", "data-japicmt-replyid"];

// Markdown 可选；无论是否解析，入库前一律清洗
pub fn render(content: &str, parse_markdown: bool) -> String {
    if parse_markdown {
        sanitize(&markdown_to_html(content))
    } else {
        sanitize(content)
    }
}

pub fn markdown_to_html(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

pub fn sanitize(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    // script/style 的内容整体丢弃，而不是只去掉标签
    builder
        .rm_tags(FORBIDDEN_TAGS)
        .rm_generic_attributes(FORBIDDEN_ATTRS);
    builder.clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_removed_without_markdown() {
        let out = render("hi <script>alert(1)</script>", false);
        assert!(!out.contains("<script"));
        assert!(!out.contains("alert(1)"));
        assert!(out.contains("hi"));
    }

    #[test]
    fn test_script_removed_with_markdown() {
        let out = render("**bold** <script>alert(1)</script>", true);
        assert!(!out.contains("<script"));
        assert!(out.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_markdown_only_when_requested() {
        assert_eq!(render("*x*", false), "*x*");
        assert_eq!(render("*x*", true).trim(), "<p><em>x</em></p>");
    }

    #[test]
    fn test_forbidden_attributes_and_style_tag() {
        let out = render(
            r#"<p class="c" style="color:red" aria-hidden="true" data-japicmt-replyid="abc123" title="t">ok</p><style>p{}</style>"#,
            false,
        );
        assert!(!out.contains("class="));
        assert!(!out.contains("style"));
        assert!(!out.contains("aria-hidden"));
        assert!(!out.contains("data-japicmt-replyid"));
        assert!(out.contains("title=\"t\""));
        assert!(out.contains("ok"));
    }

    #[test]
    fn test_event_handlers_dropped() {
        let out = sanitize(r#"<img src="a.png" onerror="alert(1)">"#);
        assert!(!out.contains("onerror"));
        assert!(out.contains("src=\"a.png\""));
    }
}
