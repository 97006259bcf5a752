//! HTML pages. Every dynamic value passes through [`escape`] on its way in.

const STYLESHEET: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/modern-normalize/1.1.0/modern-normalize.min.css";

const STYLE: &str = r#"
      body {
        padding: 20px;
        max-width: 800px;
        margin: 0 auto;
      }
      ul {
        list-style: none;
        padding: 0;
      }
      ul a {
        display: block;
        padding: 1em;
        color: #000;
        text-decoration: none;
        font-weight: bold;
      }
      ul a:hover {
        background: #eee;
      }
      li + li {
        border-top: 1px solid #eee;
      }
      textarea {
        width: 100%;
        height: calc(100vh - 40px);
        border: none;
        resize: none;
        padding: 20px;
        line-height: 1.6;
        outline: 0;
      }
      textarea:focus-visible {
        outline: 0;
      }
      form {
        display: flex;
      }
      input[type="text"] {
        padding: 1em;
        background: #efefef;
        border: none;
        flex: 1;
        outline: 0;
      }
      input[type="text"]:focus {
        background: #eee;
      }
      .button {
        border: none;
        padding: 1em;
        background: #000;
        color: #fff;
        text-decoration: none;
        cursor: pointer;
      }
      .button:hover {
        background: #333;
      }
      .is-floating {
        position: fixed;
        bottom: 20px;
        right: 20px;
      }
"#;

// Opens the page of the typed title without asking the server first.
const NEW_NOTE_SCRIPT: &str = r"
    <script type='module'>
      const form = document.getElementById('new');
      form.addEventListener('submit', function (e) {
        e.preventDefault();
        const name = new FormData(form).get('name');
        if (name) {
          document.location = '/' + encodeURIComponent(name);
        }
      });
    </script>";

// One save in flight at a time; keystrokes during a save are skipped.
const AUTOSAVE_SCRIPT: &str = r"
    <script type='module'>
      const textarea = document.getElementById('text');

      let sending = false;
      textarea.addEventListener('keyup', function () {
        if (sending) return;
        sending = true;
        fetch(location.pathname, { method: 'POST', body: this.value })
          .finally(() => sending = false);
      });
    </script>";

/// Title used by the list and not-found pages.
pub const APP_TITLE: &str = "Notes";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Path of a note's page.
pub fn note_href(id: &str) -> String {
    format!("/{}", urlencoding::encode(id))
}

/// Wraps `content` in the shared page shell. `content` is inserted as-is.
pub fn layout(content: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="stylesheet" href="{STYLESHEET}">
    <style type="text/css">{STYLE}    </style>
  </head>
  <body>
{content}
  </body>
</html>
"#,
        title = escape(title),
    )
}

pub fn note_list(ids: &[String]) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li><a href="{}">{}</a></li>"#,
                escape(&note_href(id)),
                escape(id)
            )
        })
        .collect();

    let content = format!(
        r#"    <ul>{items}</ul>
    <form action="/" method="GET" id="new">
      <input type="text" name="name" required placeholder="Title of the note" autofocus>
      <button class="button">New note</button>
    </form>{NEW_NOTE_SCRIPT}"#
    );

    layout(&content, APP_TITLE)
}

pub fn note_editor(id: &str, body: Option<&str>) -> String {
    // The parser swallows one newline right after the start tag, so always
    // emit one of our own ahead of the body.
    let content = format!(
        r#"    <textarea id="text" placeholder="Write here your notes" autofocus>
{}</textarea>
    <a class="button is-floating" href="/">Back</a>{AUTOSAVE_SCRIPT}"#,
        escape(body.unwrap_or_default())
    );

    layout(&content, id)
}

pub fn not_found() -> String {
    layout("Not found", APP_TITLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn list_links_every_note() {
        let page = note_list(&["groceries".to_string(), "work log".to_string()]);

        assert!(page.contains(r#"<li><a href="/groceries">groceries</a></li>"#));
        assert!(page.contains(r#"<li><a href="/work%20log">work log</a></li>"#));
        assert!(page.contains("<title>Notes</title>"));
        assert!(page.contains(r#"id="new""#));
    }

    #[test]
    fn list_escapes_hostile_ids() {
        let page = note_list(&["<script>alert(1)</script>".to_string()]);

        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn editor_prefills_and_escapes_body() {
        let page = note_editor("todo", Some("milk </textarea><b>eggs</b>"));

        assert!(page.contains(
            "autofocus>\nmilk &lt;/textarea&gt;&lt;b&gt;eggs&lt;/b&gt;</textarea>"
        ));
        assert!(page.contains("<title>todo</title>"));
        assert!(page.contains(r#"href="/">Back</a>"#));
    }

    #[test]
    fn editor_for_missing_note_is_empty() {
        let page = note_editor("fresh", None);

        assert!(page.contains("autofocus>\n</textarea>"));
    }

    #[test]
    fn editor_keeps_leading_newline_of_body() {
        let page = note_editor("n", Some("\nhello"));

        // One newline belongs to the markup, the next one to the note.
        assert!(page.contains("autofocus>\n\nhello</textarea>"));
    }

    #[test]
    fn not_found_page() {
        let page = not_found();

        assert!(page.contains("Not found"));
        assert!(page.contains("<title>Notes</title>"));
    }
}
