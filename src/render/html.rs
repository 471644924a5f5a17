//! HTML rendering, newest message first.

use crate::log::Message;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<title>Chat Server</title>
<style>
body {
  font-family: Sans-Serif;
}
.name {
  font-weight: bold;
}
</style>
<script>
window.onload = () => {
  setTimeout(() => {
    location.reload();
  }, 5000);
};
</script>
"#;

const EMPTY_NOTICE: &str = "No Message!\n";

/// Submit form served at `/dev`. Posts `{"name", "body"}` JSON to `/messages`.
pub const DEV_FORM: &str = r#"<!DOCTYPE html>
<script>
window.addEventListener('load', _ => {
  document.getElementById('submit-button').addEventListener('click', _ => {
    let name = document.getElementById('name').value;
    let body = document.getElementById('body').value;
    fetch('/messages', {
      method: 'POST',
      body:   JSON.stringify({'name': name, 'body': body}),
    }).then(response => {
      console.log('status:', response.status);
      return response.text();
    });
  });
});
</script>
Name: <input id="name" type="text">
Body: <input id="body" type="text">
<button id="submit-button">Submit</button>
"#;

/// Renders the message page with the newest message on top.
pub fn render_html(messages: &[Message]) -> String {
    let mut page = String::from(PAGE_HEAD);

    if messages.is_empty() {
        page.push_str(EMPTY_NOTICE);
        return page;
    }

    for message in messages.iter().rev() {
        page.push_str("<div><span class=\"name\">");
        page.push_str(&escape_html(&message.name));
        page.push_str("</span>: ");
        page.push_str(&escape_html(&message.body));
        page.push_str("</div>\n");
    }
    page
}

/// Escapes text for use in HTML element content and attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '\0' => escaped.push('\u{FFFD}'),
            _ => escaped.push(c),
        }
    }
    escaped
}
