//! Bookings page adapter
//!
//! Maps the rendered ParentZone month view onto [`CalendarSurface`]. Class
//! names on the page are generated by the site's CSS-in-JS build and change
//! without notice, so every selector lives in [`PageSelectors`] and can be
//! replaced from configuration code.

use std::sync::Arc;

use async_trait::async_trait;
use bookingcal_core::{BookingElement, CalendarSurface, DayCell};
use bookingcal_domain::Result;
use tracing::{debug, instrument};

use super::protocol::{ElementRef, Locator};
use super::session::WebDriverSession;

/// Next-month control, tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextControl {
    pub locator: Locator,
    /// Resolve from the match to the clickable element, e.g. `..` for an icon
    /// nested in its button.
    pub parent: Option<Locator>,
}

impl NextControl {
    pub fn direct(locator: Locator) -> Self {
        Self { locator, parent: None }
    }

    pub fn via_parent(locator: Locator, parent: Locator) -> Self {
        Self { locator, parent: Some(parent) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectors {
    pub month_header: Locator,
    pub day_cell: Locator,
    pub day_date: Locator,
    pub booking: Locator,
    pub child_name: Locator,
    pub session_time: Locator,
    pub next_month: Vec<NextControl>,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            month_header: Locator::css(
                "h6.MuiTypography-root.MuiTypography-h6.MuiTypography-noWrap.css-1dw86cl-titleWithButtons",
            ),
            day_cell: Locator::css("div.css-1btmizi-day.css-1eqmmqv-dayDesktop.css-1ke78x2-dayBorder"),
            day_date: Locator::css("p.MuiTypography-root.MuiTypography-body2.css-68o8xu"),
            booking: Locator::css("div.css-jvibwz-buttonContainer"),
            child_name: Locator::css("span.css-cypr81-childName"),
            session_time: Locator::css("span.css-11fzqss-sessionTime"),
            next_month: vec![
                NextControl::direct(Locator::css(r#"button[data-test-id="next_btn"]"#)),
                NextControl::direct(Locator::css(
                    "button.MuiButtonBase-root.MuiIconButton-root.MuiIconButton-sizeSmall.css-1j7qk7u",
                )),
                NextControl::via_parent(
                    Locator::css(r#"svg[data-testid="ChevronRightIcon"]"#),
                    Locator::xpath(".."),
                ),
            ],
        }
    }
}

/// The logged-in bookings page of one browser session.
#[derive(Debug, Clone)]
pub struct ParentZonePage {
    session: Arc<WebDriverSession>,
    selectors: PageSelectors,
}

impl ParentZonePage {
    pub fn new(session: Arc<WebDriverSession>) -> Self {
        Self { session, selectors: PageSelectors::default() }
    }

    pub fn with_selectors(mut self, selectors: PageSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn selectors(&self) -> &PageSelectors {
        &self.selectors
    }

    async fn child_text(&self, parent: &ElementRef, locator: &Locator) -> Result<Option<String>> {
        match self.session.find_child(parent, locator).await? {
            Some(element) => Ok(Some(self.session.text(&element).await?)),
            None => Ok(None),
        }
    }

    async fn read_cell(&self, cell: &ElementRef) -> Result<DayCell> {
        let date_label = self.child_text(cell, &self.selectors.day_date).await?.unwrap_or_default();

        let mut bookings = Vec::new();
        for element in self.session.find_children(cell, &self.selectors.booking).await? {
            bookings.push(BookingElement {
                child_name: self.child_text(&element, &self.selectors.child_name).await?,
                session_time: self.child_text(&element, &self.selectors.session_time).await?,
            });
        }

        Ok(DayCell { date_label, bookings })
    }

    async fn locate_next(&self) -> Result<Option<ElementRef>> {
        for control in &self.selectors.next_month {
            let Some(found) = self.session.find_element(&control.locator).await? else {
                continue;
            };
            let target = match &control.parent {
                Some(parent) => self.session.find_child(&found, parent).await?,
                None => Some(found),
            };
            if target.is_some() {
                debug!(locator = %control.locator, "page.next_control_located");
                return Ok(target);
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl CalendarSurface for ParentZonePage {
    async fn current_month_label(&self) -> Result<Option<String>> {
        match self.session.find_element(&self.selectors.month_header).await? {
            Some(header) => Ok(Some(self.session.text(&header).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn day_cells(&self) -> Result<Vec<DayCell>> {
        let elements = self.session.find_elements(&self.selectors.day_cell).await?;
        let mut cells = Vec::with_capacity(elements.len());

        for element in &elements {
            match self.read_cell(element).await {
                Ok(cell) => cells.push(cell),
                Err(err) => debug!(element = element.id(), error = %err, "page.day_cell_skipped"),
            }
        }

        debug!(found = elements.len(), read = cells.len(), "page.day_cells_read");
        Ok(cells)
    }

    async fn click_next_month(&self) -> Result<bool> {
        match self.locate_next().await? {
            Some(control) => {
                self.session.click(&control).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
