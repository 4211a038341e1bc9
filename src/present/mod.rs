//! Presentation of query results
//!
//! The query loop hands a [`View`] to a [`Presenter`]. [`ConsolePresenter`]
//! prints tables to the terminal and writes maps as standalone HTML pages.

pub mod map;
pub mod table;

use std::io::Write;
use std::path::PathBuf;

use crate::Result;

/// How a result set is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentMode {
    Map,
    Table,
}

/// Fixed display projection of a record type
pub trait Presentable {
    /// Header of the primary label
    const LABEL_FIELD: &'static str;
    /// Headers of the detail values, in [`Presentable::details`] order
    const DETAIL_FIELDS: &'static [&'static str];

    fn label(&self) -> String;
    fn details(&self) -> Vec<String>;
    /// `(latitude, longitude)` when both are known
    fn position(&self) -> Option<(f64, f64)>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub label: String,
    pub details: Vec<String>,
    pub position: Option<(f64, f64)>,
}

/// Everything a presenter needs to render one result set
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub mode: PresentMode,
    pub title: String,
    pub label_field: &'static str,
    pub detail_fields: &'static [&'static str],
    pub rows: Vec<ViewRow>,
}

impl View {
    pub fn from_records<T: Presentable>(mode: PresentMode, title: &str, records: &[&T]) -> Self {
        Self {
            mode,
            title: title.to_string(),
            label_field: T::LABEL_FIELD,
            detail_fields: T::DETAIL_FIELDS,
            rows: records
                .iter()
                .map(|r| ViewRow {
                    label: r.label(),
                    details: r.details(),
                    position: r.position(),
                })
                .collect(),
        }
    }

    /// Copy of the view holding only the rows a map cannot place
    #[must_use]
    pub fn unplaced(&self) -> View {
        View {
            mode: PresentMode::Table,
            rows: self
                .rows
                .iter()
                .filter(|r| r.position.is_none())
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Label header followed by detail headers
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        std::iter::once(self.label_field)
            .chain(self.detail_fields.iter().copied())
            .collect()
    }
}

/// Render target for results; rendering is fire-and-forget for the caller
pub trait Presenter {
    fn present(&mut self, view: &View) -> Result<()>;
}

/// Tables to the terminal, maps to HTML files in `map_dir`
pub struct ConsolePresenter<W> {
    output: W,
    map_dir: PathBuf,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(output: W, map_dir: PathBuf) -> Self {
        Self { output, map_dir }
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn present(&mut self, view: &View) -> Result<()> {
        match view.mode {
            PresentMode::Table => {
                writeln!(self.output, "\n{}\n", view.title)?;
                write!(self.output, "{}", table::render(view))?;
            }
            PresentMode::Map => {
                let unplaced = view.unplaced();
                if unplaced.rows.len() == view.rows.len() {
                    writeln!(
                        self.output,
                        "\n{}: none of the {} results can be mapped\n",
                        view.title,
                        view.rows.len()
                    )?;
                    write!(self.output, "{}", table::render(view))?;
                } else {
                    let path = map::write_page(view, &self.map_dir)?;
                    writeln!(
                        self.output,
                        "\n{} ({} results): map of {} saved to {}",
                        view.title,
                        view.rows.len(),
                        view.rows.len() - unplaced.rows.len(),
                        path.display()
                    )?;
                    if !unplaced.rows.is_empty() {
                        writeln!(
                            self.output,
                            "\n{} results have no full position and are not on the map:\n",
                            unplaced.rows.len()
                        )?;
                        write!(self.output, "{}", table::render(&unplaced))?;
                    }
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Pin(&'static str, Option<(f64, f64)>);

    impl Presentable for Pin {
        const LABEL_FIELD: &'static str = "name";
        const DETAIL_FIELDS: &'static [&'static str] = &["kind"];

        fn label(&self) -> String {
            self.0.to_string()
        }

        fn details(&self) -> Vec<String> {
            vec!["pin".to_string()]
        }

        fn position(&self) -> Option<(f64, f64)> {
            self.1
        }
    }

    #[test]
    fn test_view_from_records() {
        let a = Pin("A", Some((1.0, 2.0)));
        let b = Pin("B", None);
        let view = View::from_records(PresentMode::Map, "Pins", &[&a, &b]);

        assert_eq!(view.headers(), vec!["name", "kind"]);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].position, Some((1.0, 2.0)));
        assert_eq!(view.rows[1].label, "B");
    }

    #[test]
    fn test_console_presenter_table() {
        let a = Pin("A", None);
        let view = View::from_records(PresentMode::Table, "Pins", &[&a]);
        let mut out = Vec::new();
        ConsolePresenter::new(&mut out, PathBuf::from("unused"))
            .present(&view)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Pins"));
        assert!(text.contains("name"));
        assert!(text.contains("pin"));
    }

    #[test]
    fn test_map_lists_unplaced_rows() {
        let dir = tempdir().unwrap();
        let a = Pin("Placed", Some((40.44, -79.99)));
        let b = Pin("Half Placed", None);
        let view = View::from_records(PresentMode::Map, "Pins", &[&a, &b]);
        let mut out = Vec::new();
        ConsolePresenter::new(&mut out, dir.path().to_path_buf())
            .present(&view)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(2 results): map of 1 saved to"));
        assert!(text.contains("1 results have no full position"));
        assert!(text.contains("Half Placed"));
    }

    #[test]
    fn test_map_without_positions_becomes_table() {
        let dir = tempdir().unwrap();
        let a = Pin("Nowhere", None);
        let view = View::from_records(PresentMode::Map, "Pins", &[&a]);
        let mut out = Vec::new();
        ConsolePresenter::new(&mut out, dir.path().join("maps"))
            .present(&view)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("none of the 1 results can be mapped"));
        assert!(text.contains("Nowhere"));
        assert!(!dir.path().join("maps").exists());
    }

    #[test]
    fn test_console_presenter_map_writes_file() {
        let dir = tempdir().unwrap();
        let a = Pin("A", Some((40.44, -79.99)));
        let view = View::from_records(PresentMode::Map, "Pins", &[&a]);
        let mut out = Vec::new();
        ConsolePresenter::new(&mut out, dir.path().to_path_buf())
            .present(&view)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("map of 1 saved to"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
