//! The project catalog and its rendering to card markup.
//!
//! Projects ship as a bundled JSON file so the grid, the modal, and any
//! future build step all read the same data. Preview images are
//! generated SVG placeholders carried inline as data URIs, so the page
//! works with no image assets at all.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::encode::percent_encode;

/// One portfolio entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Captions baked into the generated preview slides, one per slide.
    pub image_labels: Vec<String>,
    pub tags: Vec<String>,
    pub repo: String,
    pub demo: String,
}

/// The bundled catalog, in display order.
pub static PROJECTS: Lazy<Vec<Project>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../data/projects.json"))
        .expect("bundled project catalog is valid JSON")
});

/// Look a project up by the id carried on its card.
pub fn find(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.id == id)
}

impl Project {
    /// Data URIs for every carousel slide of this project.
    pub fn images(&self) -> Vec<String> {
        self.image_labels
            .iter()
            .map(|label| placeholder_svg(label))
            .collect()
    }

    /// Accessible name for the card acting as a button.
    pub fn aria_label(&self) -> String {
        format!("{} details", self.title)
    }
}

/// Render a labelled placeholder preview as an `image/svg+xml` data
/// URI. The SVG uses single-quoted attributes and is percent-encoded
/// exactly once, so the `#` in each color becomes `%23` and nothing is
/// escaped twice.
pub fn placeholder_svg(label: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='800' height='450'>\
         <defs><linearGradient id='g' x1='0' x2='1'>\
         <stop offset='0' stop-color='#00f0ff'/>\
         <stop offset='1' stop-color='#ff4dd2'/>\
         </linearGradient></defs>\
         <rect width='100%' height='100%' fill='#0b0f14'/>\
         <g fill='none' stroke='url(#g)' stroke-width='3' opacity='0.8'>\
         <rect x='50' y='40' width='700' height='370' rx='20'/>\
         <circle cx='200' cy='225' r='80'/>\
         <circle cx='600' cy='225' r='60'/>\
         </g>\
         <text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' \
         fill='#c6f9ff' font-family='Inter' font-size='28'>{}</text>\
         </svg>",
        escape_html(label)
    );
    format!("data:image/svg+xml;utf8,{}", percent_encode(&svg))
}

/// `<li>` items for a project's tag list, escaped for `innerHTML`.
/// Shared by the grid cards and the modal's tag strip.
pub fn tag_list_html(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("<li>{}</li>", escape_html(tag)))
        .collect()
}

/// Markup for one card in the project grid. The card doubles as a
/// button that opens the detail modal, so it carries a `data-project`
/// hook with the id to look up.
pub fn card_html(project: &Project) -> String {
    let title = escape_html(&project.title);
    let thumb = match project.image_labels.first() {
        Some(label) => placeholder_svg(label),
        None => placeholder_svg("Preview"),
    };
    let tags = tag_list_html(&project.tags);
    format!(
        "<article class=\"project-card tilt\" tabindex=\"0\" role=\"button\" \
         aria-label=\"{} details\" data-project=\"{}\">\
         <div class=\"project-thumb\">\
         <img src=\"{}\" alt=\"Preview of {}\" loading=\"lazy\" />\
         </div>\
         <div class=\"project-body\"><h3>{}</h3><p>{}</p>\
         <ul class=\"project-tags\">{}</ul></div>\
         </article>",
        title,
        escape_html(&project.id),
        thumb,
        title,
        title,
        escape_html(&project.description),
        tags
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_loads_in_order() {
        let ids: Vec<&str> = PROJECTS.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn find_resolves_card_hooks() {
        let project = find("p2").unwrap();
        assert_eq!(project.title, "3D Landing");
        assert_eq!(project.aria_label(), "3D Landing details");
        assert!(find("p9").is_none());
    }

    #[test]
    fn every_label_becomes_a_slide() {
        assert_eq!(find("p1").unwrap().images().len(), 2);
        assert_eq!(find("p3").unwrap().images().len(), 1);
    }

    #[test]
    fn placeholder_is_a_fully_encoded_data_uri() {
        let uri = placeholder_svg("Neon Dashboard 1");
        let payload = uri.strip_prefix("data:image/svg+xml;utf8,").unwrap();
        assert!(payload.starts_with("%3Csvg"));
        assert!(payload.contains("Neon%20Dashboard%201"));
        assert!(!payload.contains('<'));
        assert!(!payload.contains(' '));
    }

    #[test]
    fn placeholder_colors_encode_once() {
        let uri = placeholder_svg("Preview");
        assert!(uri.contains("%2300f0ff"));
        assert!(uri.contains("%23ff4dd2"));
        assert!(!uri.contains("%2523"));
    }

    #[test]
    fn card_markup_carries_the_lookup_hook() {
        let html = card_html(find("p1").unwrap());
        assert!(html.contains("data-project=\"p1\""));
        assert!(html.contains("aria-label=\"Neon Dashboard details\""));
        assert!(html.contains("alt=\"Preview of Neon Dashboard\""));
        assert!(html.contains("<li>GSAP</li>"));
        assert!(html.contains("role=\"button\""));
    }

    #[test]
    fn tag_items_escape_markup() {
        let tags = vec!["WebGL".to_string(), "<em>sneaky</em>".to_string()];
        assert_eq!(
            tag_list_html(&tags),
            "<li>WebGL</li><li>&lt;em&gt;sneaky&lt;/em&gt;</li>"
        );
        assert_eq!(tag_list_html(&[]), "");
    }

    #[test]
    fn card_markup_escapes_content() {
        let project = Project {
            id: "x".into(),
            title: "A <b>bold</b> & risky title".into(),
            description: "quote \" here".into(),
            image_labels: vec![],
            tags: vec!["<script>".into()],
            repo: "#".into(),
            demo: "#".into(),
        };
        let html = card_html(&project);
        assert!(html.contains("A &lt;b&gt;bold&lt;/b&gt; &amp; risky title"));
        assert!(html.contains("<li>&lt;script&gt;</li>"));
        assert!(html.contains("quote &quot; here"));
        assert!(!html.contains("<script>"));
    }
}
