//! The window of numbered page links shown around the current page.
//!
//! Short result sets list every page. Longer ones show the first two pages,
//! a slider around the current page and the last two pages, collapsing the
//! slider into either end when the current page is close to it:
//!
//! ```text
//! 1 2 3 4 5 6 7 8 9 10 ... 49 50     close to the beginning
//! 1 2 ... 22 23 24 25 26 27 28 ... 49 50
//! 1 2 ... 41 42 43 44 45 46 47 48 49 50
//! ```

use serde::Serialize;

use crate::constants::ELLIPSIS;
use crate::paginator::HybridPaginator;

/// Page number and URL pairs, in page order.
pub type UrlRange = Vec<(u64, String)>;

/// The three parts of a link window. Absent parts are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window {
    /// Leading pages.
    pub first: Option<UrlRange>,
    /// Pages around the current page.
    pub slider: Option<UrlRange>,
    /// Trailing pages.
    pub last: Option<UrlRange>,
}

/// One rendered element of the link window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A run of consecutive page links.
    Pages(UrlRange),
    /// A gap between runs.
    Ellipsis,
}

/// One entry of the flat link list sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Target, or `None` for a gap or an unavailable direction.
    pub url: Option<String>,
    /// Text to show.
    pub label: String,
    /// Whether this is the current page.
    pub active: bool,
}

/// Builds the link window of a paginator.
#[derive(Debug)]
pub struct UrlWindow<'a, T> {
    paginator: &'a HybridPaginator<T>,
}

impl<'a, T> UrlWindow<'a, T> {
    /// Window for `paginator`.
    pub const fn new(paginator: &'a HybridPaginator<T>) -> Self {
        Self { paginator }
    }

    /// Compute the window of `paginator`.
    pub fn make(paginator: &'a HybridPaginator<T>) -> Window {
        Self::new(paginator).get()
    }

    /// Compute the window.
    pub fn get(&self) -> Window {
        let on_each_side = self.paginator.options().on_each_side;
        if self.last_page() < on_each_side.saturating_mul(2).saturating_add(8) {
            return self.small_slider();
        }
        self.url_slider(on_each_side)
    }

    /// Every page, for result sets too short to collapse.
    fn small_slider(&self) -> Window {
        Window {
            first: Some(self.paginator.get_url_range(1, self.last_page())),
            slider: None,
            last: None,
        }
    }

    fn url_slider(&self, on_each_side: u64) -> Window {
        let window = on_each_side.saturating_add(4);
        let current = self.paginator.current_page();
        let last_page = self.last_page();

        if last_page <= 1 {
            return Window::default();
        }

        if current <= window {
            Window {
                first: Some(self.paginator.get_url_range(1, window + on_each_side)),
                slider: None,
                last: Some(self.finish()),
            }
        } else if current > last_page.saturating_sub(window) {
            let start = last_page.saturating_sub((window - 1).saturating_add(on_each_side));
            Window {
                first: Some(self.start()),
                slider: None,
                last: Some(self.paginator.get_url_range(start, last_page)),
            }
        } else {
            Window {
                first: Some(self.start()),
                slider: Some(
                    self.paginator
                        .get_url_range(current - on_each_side, current + on_each_side),
                ),
                last: Some(self.finish()),
            }
        }
    }

    fn start(&self) -> UrlRange {
        self.paginator.get_url_range(1, 2)
    }

    fn finish(&self) -> UrlRange {
        let last_page = self.last_page();
        self.paginator.get_url_range(last_page - 1, last_page)
    }

    /// The last page to link to.
    ///
    /// Without a total, the window ends at the next page when the peek row
    /// says one exists.
    fn last_page(&self) -> u64 {
        self.paginator.last_page().unwrap_or_else(|| {
            self.paginator
                .current_page()
                .saturating_add(u64::from(self.paginator.has_more_pages()))
        })
    }
}

impl<T> HybridPaginator<T> {
    /// The link window as elements: ranges with gaps between them.
    pub fn elements(&self) -> Vec<Element> {
        let Window { first, slider, last } = UrlWindow::make(self);
        let mut elements = Vec::with_capacity(5);
        elements.extend(first.map(Element::Pages));
        if let Some(slider) = slider {
            elements.push(Element::Ellipsis);
            elements.push(Element::Pages(slider));
        }
        if let Some(last) = last {
            elements.push(Element::Ellipsis);
            elements.push(Element::Pages(last));
        }
        elements.retain(|element| !matches!(element, Element::Pages(pages) if pages.is_empty()));
        elements
    }

    /// The link window flattened into previous, numbered and next links.
    pub fn link_collection(&self) -> Vec<Link> {
        let elements = self.elements();
        let mut links = Vec::with_capacity(elements.len() + 2);
        links.push(Link {
            url: self.previous_page_url(),
            label: self.options().previous_label.clone(),
            active: false,
        });
        for element in elements {
            match element {
                Element::Pages(pages) => links.extend(pages.into_iter().map(|(page, url)| Link {
                    url: Some(url),
                    label: page.to_string(),
                    active: page == self.current_page(),
                })),
                Element::Ellipsis => links.push(Link {
                    url: None,
                    label: ELLIPSIS.to_string(),
                    active: false,
                }),
            }
        }
        links.push(Link {
            url: self.next_page_url(),
            label: self.options().next_label.clone(),
            active: false,
        });
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PaginatorOptions;
    use crate::paginator::PageParts;
    use serde_json::{Value as Json, json};

    fn paginator(current: u64, total: u64) -> HybridPaginator<Json> {
        let first = (current - 1) * 10 + 1;
        let rows: Vec<Json> = (first..first + 10).map(|id| json!({"id": id})).collect();
        let parts = PageParts::new(rows, 10)
            .ordering_keys(["id"])
            .total(total)
            .page(current, Some(current.saturating_sub(1)));
        HybridPaginator::new(parts, PaginatorOptions::default()).unwrap()
    }

    fn pages(range: Option<UrlRange>) -> Option<Vec<u64>> {
        range.map(|range| range.into_iter().map(|(page, _)| page).collect())
    }

    #[test]
    fn test_small_window_lists_every_page() {
        let window = UrlWindow::make(&paginator(3, 130));
        assert_eq!(pages(window.first), Some((1..=13).collect()));
        assert_eq!(window.slider, None);
        assert_eq!(window.last, None);
    }

    #[test]
    fn test_close_to_beginning() {
        let window = UrlWindow::make(&paginator(2, 500));
        assert_eq!(pages(window.first), Some((1..=10).collect()));
        assert_eq!(window.slider, None);
        assert_eq!(pages(window.last), Some(vec![49, 50]));
    }

    #[test]
    fn test_full_slider() {
        let window = UrlWindow::make(&paginator(25, 500));
        assert_eq!(pages(window.first), Some(vec![1, 2]));
        assert_eq!(pages(window.slider), Some((22..=28).collect()));
        assert_eq!(pages(window.last), Some(vec![49, 50]));
    }

    #[test]
    fn test_close_to_ending() {
        let window = UrlWindow::make(&paginator(47, 500));
        assert_eq!(pages(window.first), Some(vec![1, 2]));
        assert_eq!(window.slider, None);
        assert_eq!(pages(window.last), Some((41..=50).collect()));
    }

    #[test]
    fn test_on_each_side_zero() {
        let page = paginator(10, 200).on_each_side(0);
        let window = UrlWindow::make(&page);
        assert_eq!(pages(window.slider), Some(vec![10]));

        let window = UrlWindow::make(&paginator(19, 200).on_each_side(0));
        assert_eq!(pages(window.last), Some((17..=20).collect()));
    }

    #[test]
    fn test_elements() {
        let elements = paginator(25, 500).elements();
        assert_eq!(elements.len(), 5);
        assert_eq!(elements[1], Element::Ellipsis);
        assert_eq!(elements[3], Element::Ellipsis);

        let elements = paginator(2, 500).elements();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[1], Element::Ellipsis);

        assert_eq!(paginator(1, 40).elements().len(), 1);
    }

    #[test]
    fn test_link_collection() {
        let links = paginator(2, 500).link_collection();
        let labels: Vec<&str> = links.iter().map(|link| link.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Previous", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "...", "49", "50", "Next"]
        );

        let active: Vec<&str> = links
            .iter()
            .filter(|link| link.active)
            .map(|link| link.label.as_str())
            .collect();
        assert_eq!(active, ["2"]);

        let gap = &links[11];
        assert_eq!(gap.url, None);
        assert!(links.first().is_some_and(|link| link.url.is_some()));
        assert!(links.last().is_some_and(|link| link.url.is_some()));
    }

    #[test]
    fn test_first_page_has_no_previous_link() {
        let links = paginator(1, 30).link_collection();
        assert_eq!(links.first().map(|link| link.url.clone()), Some(None));
        assert_eq!(links.len(), 5);
    }

    #[test]
    fn test_backward_arrival_without_total_links_next_page() {
        let rows: Vec<Json> = (1..=10).rev().map(|id| json!({"id": id})).collect();
        let parts = PageParts::new(rows, 10)
            .ordering_keys(["id"])
            .page(1, Some(2))
            .cursor(crate::cursor::Cursor::backward().int("id", 11));
        let links = HybridPaginator::new(parts, PaginatorOptions::default())
            .unwrap()
            .link_collection();

        let labels: Vec<&str> = links.iter().map(|link| link.label.as_str()).collect();
        assert_eq!(labels, ["Previous", "1", "2", "Next"]);
        assert!(links.last().is_some_and(|link| link.url.is_some()));
    }

    #[test]
    fn test_custom_labels() {
        let options = PaginatorOptions {
            previous_label: "Newer".into(),
            next_label: "Older".into(),
            ..PaginatorOptions::default()
        };
        let rows: Vec<Json> = (1..=11).map(|id| json!({"id": id})).collect();
        let parts = PageParts::new(rows, 10).ordering_keys(["id"]);
        let links = HybridPaginator::new(parts, options).unwrap().link_collection();

        assert_eq!(links.first().map(|link| link.label.as_str()), Some("Newer"));
        assert_eq!(links.last().map(|link| link.label.as_str()), Some("Older"));
        // unknown total: current page plus the one the peek row found
        assert_eq!(links.len(), 4);
    }
}
