//! Console rendering of rows and cells

use std::fmt;

use crate::model::{Cell, Row};

/// `Family: cf1    Qualifier: name    Value: World`
pub struct CellLine<'a>(pub &'a Cell);

impl fmt::Display for CellLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Family: {}    Qualifier: {}    Value: {}",
            self.0.family(),
            self.0.qualifier(),
            self.0.value()
        )
    }
}

/// Full row dump grouped by family, with timestamps and labels
///
/// ```text
/// Reading data for rowKey0
/// Column Family cf1
/// 	greeting: Hello World! @1700000000000001
/// 	name: World @1700000000000002 [latest]
///
/// ```
pub struct RowDisplay<'a>(pub &'a Row);

impl fmt::Display for RowDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reading data for {}", self.0.key())?;
        let mut family: Option<&str> = None;
        for cell in self.0.cells() {
            if family != Some(cell.family()) {
                family = Some(cell.family());
                writeln!(f, "Column Family {}", cell.family())?;
            }
            write!(
                f,
                "\t{}: {} @{}",
                cell.qualifier(),
                cell.value(),
                cell.timestamp()
            )?;
            if !cell.labels().is_empty() {
                write!(f, " [{}]", cell.labels().join(","))?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
