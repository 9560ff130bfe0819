use crate::{AppState, LoadState, Tour, TourId};

pub const LOADING_TEXT: &str = "Loading tours...";
pub const TOGGLE_EXPAND_LABEL: &str = "Read More";
pub const TOGGLE_COLLAPSE_LABEL: &str = "Show Less";
pub const REMOVE_LABEL: &str = "Not Interested";
pub const ELLIPSIS: &str = "...";
/// Characters of `info` shown while a card is collapsed.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryView {
    Loading { text: String },
    Error { text: String },
    Cards(Vec<CardView>),
}

impl GalleryView {
    pub fn cards(&self) -> &[CardView] {
        match self {
            GalleryView::Cards(cards) => cards,
            GalleryView::Loading { .. } | GalleryView::Error { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: TourId,
    pub name: String,
    pub image: String,
    pub price_label: String,
    pub description: String,
    pub expanded: bool,
    pub toggle_label: &'static str,
    pub remove_label: &'static str,
}

impl CardView {
    fn from_tour(tour: &Tour) -> Self {
        let (description, toggle_label) = if tour.show_full_description {
            (tour.info.clone(), TOGGLE_COLLAPSE_LABEL)
        } else {
            (preview(&tour.info), TOGGLE_EXPAND_LABEL)
        };
        Self {
            id: tour.id.clone(),
            name: tour.name.clone(),
            image: tour.image.clone(),
            price_label: format!("${}", tour.price),
            description,
            expanded: tour.show_full_description,
            toggle_label,
            remove_label: REMOVE_LABEL,
        }
    }
}

impl AppState {
    pub fn view(&self) -> GalleryView {
        match self.load() {
            LoadState::Loading => GalleryView::Loading {
                text: LOADING_TEXT.to_string(),
            },
            LoadState::Failed(message) => GalleryView::Error {
                text: format!("Error: {message}"),
            },
            LoadState::Loaded(tours) => {
                GalleryView::Cards(tours.iter().map(CardView::from_tour).collect())
            }
        }
    }
}

fn preview(info: &str) -> String {
    let mut out: String = info.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    out.push_str(ELLIPSIS);
    out
}
