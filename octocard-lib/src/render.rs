use crate::escape::escape_html;
use crate::types::ProfileRecord;

/// Tone of a status message shown in the display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Info,
    Error,
}

impl MessageTone {
    fn class(self) -> &'static str {
        match self {
            MessageTone::Info => "message",
            MessageTone::Error => "message message--error",
        }
    }
}

/// Minimal owned element tree. Text and attribute values are escaped when
/// the tree is written out, so no raw remote string can reach the markup
/// unescaped regardless of which render path inserted it.
struct HtmlNode {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<HtmlChild>,
}

enum HtmlChild {
    Text(String),
    Node(HtmlNode),
}

impl HtmlNode {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    fn class(self, value: &'static str) -> Self {
        self.attr("class", value)
    }

    fn text(mut self, value: impl Into<String>) -> Self {
        self.children.push(HtmlChild::Text(value.into()));
        self
    }

    fn child(mut self, node: HtmlNode) -> Self {
        self.children.push(HtmlChild::Node(node));
        self
    }

    fn to_html(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        if self.tag == "img" {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                HtmlChild::Text(text) => out.push_str(&escape_html(text)),
                HtmlChild::Node(node) => node.write(out),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Replaces the display area's content with a single status element.
///
/// Used for validation failures and lookup failures; the loading indicator
/// has its own builder below.
pub fn render_message(text: &str, tone: MessageTone) -> String {
    HtmlNode::new("div")
        .class(tone.class())
        .attr("role", "status")
        .text(text)
        .to_html()
}

/// Loading indicator for an in-flight lookup.
pub fn render_loading(login: &str) -> String {
    HtmlNode::new("div")
        .class("message")
        .attr("role", "status")
        .text("Loading profile for ")
        .child(HtmlNode::new("strong").text(login))
        .text("…")
        .to_html()
}

/// Builds the profile card markup for a successful lookup.
///
/// Statistic fields appear in the fixed order followers, following, repos;
/// the optional link fragments in the fixed order location, company,
/// website, each only when its source field is present.
pub fn render_profile(record: &ProfileRecord) -> String {
    let display_name = record.display_name();

    let mut stats = HtmlNode::new("div").class("stats").attr("role", "list");
    for (count, label) in [
        (record.followers, "Followers"),
        (record.following, "Following"),
        (record.public_repos, "Repos"),
    ] {
        stats = stats.child(
            HtmlNode::new("div")
                .class("stat")
                .attr("role", "listitem")
                .child(HtmlNode::new("strong").text(count.to_string()))
                .child(HtmlNode::new("span").text(label)),
        );
    }

    let mut links = HtmlNode::new("div").class("links").child(
        HtmlNode::new("a")
            .class("link-btn")
            .attr("href", record.html_url.as_str())
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .text("View on GitHub ↗"),
    );
    if let Some(location) = record.location() {
        links = links.child(
            HtmlNode::new("span")
                .class("link-btn")
                .attr("aria-hidden", "true")
                .text(format!("📍 {location}")),
        );
    }
    if let Some(company) = record.company() {
        links = links.child(
            HtmlNode::new("span")
                .class("link-btn")
                .attr("aria-hidden", "true")
                .text(format!("🏢 {company}")),
        );
    }
    if let Some(target) = record.website_target() {
        links = links.child(
            HtmlNode::new("a")
                .class("link-btn")
                .attr("href", target)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text("🔗 Website"),
        );
    }

    HtmlNode::new("article")
        .class("card")
        .attr("id", "profileCard")
        .attr("aria-label", format!("GitHub profile for {}", record.login))
        .child(
            HtmlNode::new("div").class("card__avatar").child(
                HtmlNode::new("img")
                    .class("avatar")
                    .attr("src", record.avatar_url.as_str())
                    .attr("alt", format!("{display_name}'s avatar")),
            ),
        )
        .child(
            HtmlNode::new("div")
                .class("card__body")
                .child(HtmlNode::new("h2").class("name").text(display_name))
                .child(
                    HtmlNode::new("div")
                        .class("handle")
                        .text(format!("@{}", record.login)),
                )
                .child(
                    HtmlNode::new("p")
                        .class("bio")
                        .text(record.bio().unwrap_or("No bio available")),
                )
                .child(stats)
                .child(links),
        )
        .to_html()
}
