//! HTML overview rendering.

use std::path::{Path, PathBuf};
use storyboard_error::StoryboardResult;
use storyboard_pipeline::AssembledStoryboard;
use storyboard_storage::FileSystemStorage;
use tracing::{info, instrument};

/// File name of the overview, written next to the frame images.
pub const OVERVIEW_FILE_NAME: &str = "storyboard_overview.html";

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { color: #333; }
        .storyboard { display: flex; flex-wrap: wrap; gap: 20px; }
        .frame {
            width: 300px;
            border: 1px solid #ddd;
            padding: 10px;
            border-radius: 5px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
        }
        .frame img { width: 100%; height: auto; border-radius: 5px; }
        .missing {
            display: flex; align-items: center; justify-content: center;
            height: 200px; background: #f4f4f4; color: #999; border-radius: 5px;
        }
        .frame-number { font-weight: bold; margin: 10px 0 5px; }
        .description { color: #555; }
"#;

/// Escape text for use in HTML content and attribute values.
///
/// ```
/// use storyboard::escape_html;
///
/// assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render the storyboard as a standalone HTML page.
///
/// Images are referenced by file name only, so the page must sit in the
/// same directory as the images. Frames without an image get a placeholder.
pub fn render_overview(storyboard: &AssembledStoryboard) -> String {
    let title = escape_html(storyboard.original_prompt());
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n    \
         <title>Storyboard: {title}</title>\n    <style>{STYLE}    </style>\n</head>\n<body>\n    \
         <h1>Storyboard: {title}</h1>\n    <div class=\"storyboard\">\n",
    );

    for panel in storyboard.panels() {
        let number = panel.frame_number();
        let image = match panel
            .image_path()
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy())
        {
            Some(name) => format!(
                "<img src=\"{}\" alt=\"Frame {}\">",
                escape_html(&name),
                number
            ),
            None => "<div class=\"missing\">Image not available</div>".to_string(),
        };

        html.push_str(&format!(
            "        <div class=\"frame\">\n            {image}\n            \
             <p class=\"frame-number\">Frame {number}</p>\n            \
             <p class=\"description\">{description}</p>\n        </div>\n",
            image = image,
            number = number,
            description = escape_html(panel.description()),
        ));
    }

    html.push_str("    </div>\n</body>\n</html>\n");
    html
}

/// Render the overview into `output_dir` and return the path written.
///
/// Frames without an image (all of them when rendering was skipped) get the
/// placeholder.
#[instrument(skip(storyboard), fields(panels = storyboard.panels().len()))]
pub async fn write_overview(
    output_dir: &Path,
    storyboard: &AssembledStoryboard,
) -> StoryboardResult<PathBuf> {
    let store = FileSystemStorage::new(output_dir)?;
    let path = store
        .write_document(OVERVIEW_FILE_NAME, &render_overview(storyboard))
        .await?;
    info!(path = %path.display(), "Created HTML overview");
    Ok(path)
}
