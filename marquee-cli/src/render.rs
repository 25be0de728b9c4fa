//! Plain-text rendering of the widget view model.

use std::fmt::Write;

use marquee_core::WidgetView;
use marquee_core::widget::{DetailContent, DetailRegion, ListContent, ListRegion};

/// Renders all visible regions, search box first.
pub fn render_view(view: &WidgetView) -> String {
    let mut out = format!("search> {}\n", view.input.text);
    out.push_str(&render_list(&view.list));
    out.push_str(&render_detail(&view.detail));
    out
}

/// Renders the candidate list; hidden lists render as nothing.
pub fn render_list(list: &ListRegion) -> String {
    if !list.visible {
        return String::new();
    }

    match &list.content {
        ListContent::Empty => String::new(),
        ListContent::Loading => "  searching...\n".to_string(),
        ListContent::Message(message) => format!("  {message}\n"),
        ListContent::Error(message) => format!("  ! {message}\n"),
        ListContent::Candidates(entries) => {
            let mut out = String::new();
            for (position, entry) in entries.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {:>2}. {} ({})  [{}]  {}",
                    position + 1,
                    entry.title,
                    entry.year,
                    entry.id,
                    entry.poster
                );
            }
            out
        }
    }
}

/// Renders the detail card; hidden cards render as nothing.
pub fn render_detail(detail: &DetailRegion) -> String {
    if !detail.visible {
        return String::new();
    }

    match &detail.content {
        DetailContent::Empty => String::new(),
        DetailContent::Error(message) => format!("! {message}\n"),
        DetailContent::Card(card) => {
            let mut out = format!("== {} ==\nposter: {}\n", card.title, card.poster);
            for (label, value) in card.rows() {
                let _ = writeln!(out, "{label}: {value}");
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use marquee_core::{Candidate, Detail, MovieId, PLACEHOLDER_POSTER, Poster};

    use super::*;

    fn batman() -> Candidate {
        Candidate {
            id: MovieId::new("tt0096895"),
            title: "Batman".to_string(),
            year: "1989".to_string(),
            poster: Poster::Missing,
        }
    }

    #[test]
    fn test_hidden_regions_render_nothing() {
        let view = WidgetView::default();
        assert_eq!(render_view(&view), "search> \n");
    }

    #[test]
    fn test_candidates_are_numbered_from_one() {
        let mut list = ListRegion::default();
        list.show_candidates(&[batman()]);

        let rendered = render_list(&list);
        assert_eq!(
            rendered,
            format!("   1. Batman (1989)  [tt0096895]  {PLACEHOLDER_POSTER}\n")
        );
    }

    #[test]
    fn test_detail_card_lists_every_field() {
        let mut region = DetailRegion::default();
        region.show_card(&Detail {
            title: "Batman".to_string(),
            awards: "Won 1 Oscar.".to_string(),
            ..Detail::default()
        });

        let rendered = render_detail(&region);
        assert!(rendered.starts_with("== Batman ==\n"));
        assert!(rendered.contains("Awards: Won 1 Oscar.\n"));
        assert!(rendered.contains("Writer: \n"));
    }
}
