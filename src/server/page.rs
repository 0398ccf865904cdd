use crate::models::{GenerationResult, SessionView};

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
       font-family: system-ui, sans-serif; color: #fff;
       background: linear-gradient(135deg, #312e81, #581c87, #831843); }
.layout { display: flex; align-items: center; gap: 1.5rem; flex-wrap: wrap; }
form { display: flex; flex-direction: column; gap: 1rem; margin: 2rem 0; width: 380px; max-width: 100%; }
input { padding: .5rem; border: 1px solid #fff; border-radius: .5rem; background: transparent; color: #fff; }
button { padding: .5rem 1rem; border: 0; border-radius: .375rem; font-weight: 600; color: #fff; background: #6366f1; cursor: pointer; }
button:disabled { opacity: .5; cursor: wait; }
.secondary { background: transparent; border: 1px solid #fff; }
.result { width: 280px; border: 1px solid #fff; padding: .75rem; border-radius: 1rem; }
.result img { width: 100%; }
.error { color: #fecaca; }
"#;

fn result_section(view: &SessionView) -> String {
    match &view.result {
        GenerationResult::Idle => String::new(),
        GenerationResult::Loading => r#"<div class="result"><p>Generating…</p></div>"#.to_string(),
        GenerationResult::Success { image_url } => format!(
            r#"<div class="result"><img src="{src}" alt="{alt}"><p><a href="/download" download="{file}">Download</a></p></div>"#,
            src = escape_html(image_url),
            alt = escape_html(&view.image_alt),
            file = escape_html(&view.download_filename),
        ),
        GenerationResult::Failure { message } => {
            format!(r#"<p class="error" role="alert">{}</p>"#, escape_html(message))
        }
    }
}

/// Renders the whole single page for the current session state.
pub fn render_page(view: &SessionView) -> String {
    let disabled = if view.can_submit { "" } else { " disabled" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Get Qr Code</title>
<style>{style}</style>
</head>
<body>
<div class="layout">
<form method="post" action="/generate" onsubmit="this.querySelectorAll('button[type=submit]').forEach(b => b.disabled = true)">
<h1>Get Qr Code</h1>
<input type="text" name="text" placeholder="Enter a link here..." value="{text}">
<button type="submit"{disabled}>Submit</button>
<button type="submit" class="secondary" formaction="/clear"{disabled}>Clear</button>
</form>
{result}
</div>
</body>
</html>"#,
        style = STYLE,
        text = escape_html(&view.text),
        disabled = disabled,
        result = result_section(view),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GENERATION_FAILED_MESSAGE, IMAGE_ALT_TEXT};

    fn view(result: GenerationResult) -> SessionView {
        SessionView {
            text: String::new(),
            can_submit: !result.is_loading(),
            result,
            image_alt: IMAGE_ALT_TEXT.into(),
            download_filename: "QRCode.png".into(),
        }
    }

    #[test]
    fn test_submit_handler_disables_every_button() {
        let html = render_page(&view(GenerationResult::Idle));
        assert!(html.contains("querySelectorAll('button[type=submit]').forEach(b => b.disabled = true)"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_success_renders_image() {
        let html = render_page(&view(GenerationResult::success("https://cdn/qr.png?a=1&b=2")));
        assert!(html.contains(r#"<img src="https://cdn/qr.png?a=1&amp;b=2" alt="Generated QR Code">"#));
        assert!(html.contains(r#"href="/download""#));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_failure_renders_message_without_image() {
        let html = render_page(&view(GenerationResult::failure()));
        assert!(html.contains(&escape_html(GENERATION_FAILED_MESSAGE)));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_loading_disables_submit() {
        let html = render_page(&view(GenerationResult::Loading));
        assert!(html.contains(r#"<button type="submit" disabled>Submit</button>"#));
        assert!(html.contains(r#"formaction="/clear" disabled>Clear</button>"#));
        assert!(html.contains(r#"<div class="result"><p>Generating…</p></div>"#));
        assert!(!html.contains("<img"));

        let html = render_page(&view(GenerationResult::Idle));
        assert!(html.contains(r#"<button type="submit">Submit</button>"#));
    }
}
