//! Table header layout and page geometry

use super::columns::{Column, ColumnSection};
use super::config::{PageSize, PageStyle};

/// Margin subtracted from each side of the page
pub const PAGE_MARGIN_MM: u32 = 20;

/// Width of the serial number column in percent
pub const SERIAL_WIDTH_PERCENT: u8 = 3;

/// Cell of the top header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCell {
    /// The "#" column; spans both header rows
    Serial,
    /// A standalone column; spans both header rows
    Single(Column),
    /// Super-header over a run of AS or AR columns
    Section { section: ColumnSection, span: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub top: Vec<HeaderCell>,
    /// Columns under a section header, in table order
    pub sub: Vec<Column>,
}

impl HeaderLayout {
    /// Total table columns including the serial column
    pub fn column_count(&self) -> usize {
        self.top
            .iter()
            .map(|cell| match cell {
                HeaderCell::Serial | HeaderCell::Single(_) => 1,
                HeaderCell::Section { span, .. } => *span,
            })
            .sum()
    }

    pub fn has_sub_row(&self) -> bool {
        !self.sub.is_empty()
    }
}

/// Build the two header rows for the selected columns
///
/// Each maximal run of adjacent AS (or AR) columns gets one super-header.
/// A section split by other columns produces one super-header per run.
pub fn header_layout(columns: &[Column]) -> HeaderLayout {
    let mut top = vec![HeaderCell::Serial];
    let mut sub = Vec::new();

    for &column in columns {
        let section = column.section();
        if section == ColumnSection::Standalone {
            top.push(HeaderCell::Single(column));
            continue;
        }

        sub.push(column);
        if let Some(HeaderCell::Section {
            section: current,
            span,
        }) = top.last_mut()
        {
            if *current == section {
                *span += 1;
                continue;
            }
        }
        top.push(HeaderCell::Section { section, span: 1 });
    }

    HeaderLayout { top, sub }
}

/// Physical page and content box in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width_mm: u32,
    pub height_mm: u32,
    pub margin_mm: u32,
}

impl PageGeometry {
    pub fn new(size: PageSize, style: PageStyle) -> Self {
        let (w, h) = size.portrait_mm();
        let (width_mm, height_mm) = match style {
            PageStyle::Portrait => (w, h),
            PageStyle::Landscape => (h, w),
        };
        Self {
            width_mm,
            height_mm,
            margin_mm: PAGE_MARGIN_MM,
        }
    }

    pub fn content_width_mm(&self) -> u32 {
        self.width_mm.saturating_sub(2 * self.margin_mm)
    }

    pub fn content_height_mm(&self) -> u32 {
        self.height_mm.saturating_sub(2 * self.margin_mm)
    }

    /// Value for a CSS `@page { size: ... }` rule
    pub fn css_size(&self) -> String {
        format!("{}mm {}mm", self.width_mm, self.height_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_only() {
        let layout = header_layout(&[Column::ProjectName, Column::District]);
        assert_eq!(
            layout.top,
            vec![
                HeaderCell::Serial,
                HeaderCell::Single(Column::ProjectName),
                HeaderCell::Single(Column::District),
            ]
        );
        assert!(!layout.has_sub_row());
        assert_eq!(layout.column_count(), 3);
    }

    #[test]
    fn test_sections_merge_adjacent_columns() {
        let layout = header_layout(&[
            Column::ProjectName,
            Column::AsDate,
            Column::AsStatus,
            Column::ArArea,
            Column::ArFloors,
            Column::ArStatus,
        ]);
        assert_eq!(
            layout.top,
            vec![
                HeaderCell::Serial,
                HeaderCell::Single(Column::ProjectName),
                HeaderCell::Section {
                    section: ColumnSection::As,
                    span: 2
                },
                HeaderCell::Section {
                    section: ColumnSection::Ar,
                    span: 3
                },
            ]
        );
        assert_eq!(
            layout.sub,
            vec![
                Column::AsDate,
                Column::AsStatus,
                Column::ArArea,
                Column::ArFloors,
                Column::ArStatus,
            ]
        );
        assert_eq!(layout.column_count(), 7);
    }

    #[test]
    fn test_split_section_gets_two_headers() {
        let layout = header_layout(&[Column::AsStatus, Column::Lac, Column::AsDate]);
        assert_eq!(
            layout.top,
            vec![
                HeaderCell::Serial,
                HeaderCell::Section {
                    section: ColumnSection::As,
                    span: 1
                },
                HeaderCell::Single(Column::Lac),
                HeaderCell::Section {
                    section: ColumnSection::As,
                    span: 1
                },
            ]
        );
        assert_eq!(layout.column_count(), 4);
    }

    #[test]
    fn test_page_geometry() {
        let a4_landscape = PageGeometry::new(PageSize::A4, PageStyle::Landscape);
        assert_eq!((a4_landscape.width_mm, a4_landscape.height_mm), (297, 210));
        assert_eq!(a4_landscape.content_width_mm(), 257);
        assert_eq!(a4_landscape.css_size(), "297mm 210mm");

        let a3_portrait = PageGeometry::new(PageSize::A3, PageStyle::Portrait);
        assert_eq!((a3_portrait.width_mm, a3_portrait.height_mm), (297, 420));
        assert_eq!(a3_portrait.content_height_mm(), 380);
    }
}
