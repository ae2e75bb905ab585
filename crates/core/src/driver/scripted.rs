//! Scripted in-memory driver.
//!
//! A [`ScriptedDriver`] plays back a fixed sequence of page states: each
//! scroll (or click on a matching control) advances to the next state,
//! exactly like new reviews streaming into a live listing. Element
//! lookups run the crate's own selector engine over the parsed HTML, so
//! tests and the offline `extract` command exercise the same code paths
//! as a real browser run.

use super::{Driver, DriverError};
use crate::dom::{self, DomNode, Selector};
use std::time::Duration;

/// One snapshot of the document: markup plus its scrollable height.
#[derive(Debug, Clone)]
pub struct PageState {
    pub html: String,
    pub height: i64,
}

impl PageState {
    pub fn new(html: impl Into<String>, height: i64) -> Self {
        Self {
            html: html.into(),
            height,
        }
    }
}

pub struct ScriptedDriver {
    states: Vec<(PageState, DomNode)>,
    pos: Option<usize>,
    /// URLs passed to `navigate`, in order.
    pub visited: Vec<String>,
    /// Number of scroll-to-bottom calls performed.
    pub scrolls: usize,
    /// Number of successful clicks performed.
    pub clicks: usize,
}

impl ScriptedDriver {
    /// A driver that steps through `states`; panics on an empty script.
    pub fn new(states: Vec<PageState>) -> Self {
        assert!(!states.is_empty(), "scripted driver needs at least one page state");
        let states = states
            .into_iter()
            .map(|s| {
                let tree = dom::parse_html(&s.html);
                (s, tree)
            })
            .collect();
        Self {
            states,
            pos: None,
            visited: Vec::new(),
            scrolls: 0,
            clicks: 0,
        }
    }

    /// A single static page (never grows, height never changes).
    pub fn single(html: impl Into<String>) -> Self {
        Self::new(vec![PageState::new(html, 1000)])
    }

    fn current(&self) -> Result<&(PageState, DomNode), DriverError> {
        let pos = self.pos.ok_or(DriverError::NoPage)?;
        Ok(&self.states[pos])
    }

    fn advance(&mut self) {
        if let Some(pos) = self.pos {
            if pos + 1 < self.states.len() {
                self.pos = Some(pos + 1);
            }
        }
    }

    fn parse_selector(selector: &str) -> Result<Selector, DriverError> {
        Selector::parse(selector)
            .ok_or_else(|| DriverError::Browser(format!("bad selector: {selector}")))
    }
}

impl Driver for ScriptedDriver {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.visited.push(url.to_string());
        self.pos = Some(0);
        Ok(())
    }

    fn find_all(&mut self, selector: &str) -> Result<Vec<String>, DriverError> {
        let sel = Self::parse_selector(selector)?;
        let (_, tree) = self.current()?;
        Ok(tree.select(&sel).iter().map(|n| n.outer_html()).collect())
    }

    fn exists(&mut self, selector: &str) -> Result<bool, DriverError> {
        let sel = Self::parse_selector(selector)?;
        let (_, tree) = self.current()?;
        Ok(tree.select_first(&sel).is_some())
    }

    fn click(&mut self, selector: &str) -> Result<bool, DriverError> {
        let sel = Self::parse_selector(selector)?;
        let present = {
            let (_, tree) = self.current()?;
            tree.select_first(&sel).is_some()
        };
        if present {
            self.clicks += 1;
            self.advance();
        }
        Ok(present)
    }

    fn scroll_to_bottom(&mut self) -> Result<(), DriverError> {
        self.current()?;
        self.scrolls += 1;
        self.advance();
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<i64, DriverError> {
        Ok(self.current()?.0.height)
    }

    fn wait(&mut self, _duration: Duration) {
        // Scripted pages settle instantly.
    }
}
