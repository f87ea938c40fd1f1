//! Report builder that converts a column tree and a dataset into HTML table markup.

use std::collections::HashMap;

use crate::data::{ReportDataSet, ReportParameter, ReportTable};
use crate::tree::{ColumnTree, ColumnTreeNode};

/// Strategy for rendering the left fixed cells of a row-spanned body row.
///
/// Implementations decide which ancestor segments are unchanged from the
/// previous row (and therefore already covered by an earlier rowspan cell),
/// emit `<td>` markup only for the segments that changed, and return the
/// current row's cumulative path array so the next row can diff against it.
pub trait RowSpanPolicy {
    fn draw_row_span_column(
        &self,
        out: &mut String,
        path_node_map: &HashMap<String, ColumnTreeNode>,
        last_node_paths: Option<&[String]>,
        row_node: &ColumnTreeNode,
        separator: char,
    ) -> Option<Vec<String>>;
}

/// Default row-span policy: merge cells whose ancestor chain is identical to
/// the previous row's, and stretch each emitted cell over the rows its tree
/// node covers (`rowspan` = the node's spans when > 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeAncestorsPolicy;

impl RowSpanPolicy for MergeAncestorsPolicy {
    fn draw_row_span_column(
        &self,
        out: &mut String,
        path_node_map: &HashMap<String, ColumnTreeNode>,
        last_node_paths: Option<&[String]>,
        row_node: &ColumnTreeNode,
        separator: char,
    ) -> Option<Vec<String>> {
        if row_node.path().is_empty() {
            return None;
        }
        let segments: Vec<&str> = row_node.path().split(separator).collect();

        let level = if segments.len() > 1 { segments.len() - 1 } else { 1 };
        let mut curr_node_paths: Vec<String> = Vec::with_capacity(level);
        for i in 0..level {
            // Cumulative prefix up to this segment, matching the tree's path scheme.
            let prefix = match curr_node_paths.last() {
                Some(parent) => format!("{}{}{}", parent, segments[i], separator),
                None => format!("{}{}", segments[i], separator),
            };
            curr_node_paths.push(prefix);

            // An unchanged ancestor is already covered by a prior rowspan cell.
            // Indexing faults on purpose when the cursor disagrees with the
            // current path depth: that is malformed report metadata.
            if let Some(last) = last_node_paths {
                if last[i] == curr_node_paths[i] {
                    continue;
                }
            }

            match path_node_map.get(&curr_node_paths[i]) {
                Some(node) if node.spans() > 1 => {
                    out.push_str(&format!(
                        "<td class=\"easyreport-fixed-column\" rowspan=\"{}\">{}</td>",
                        node.spans(),
                        segments[i]
                    ));
                }
                _ => {
                    out.push_str(&format!(
                        "<td class=\"easyreport-fixed-column\">{}</td>",
                        segments[i]
                    ));
                }
            }
        }
        Some(curr_node_paths)
    }
}

/// Builds one report table. Holds the growing row-markup buffer, so allocate
/// one builder per render and do not share it across reports.
pub struct ReportBuilder<'a> {
    data_set: &'a ReportDataSet,
    parameter: &'a ReportParameter,
    table_rows: String,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(data_set: &'a ReportDataSet, parameter: &'a ReportParameter) -> Self {
        Self {
            data_set,
            parameter,
            table_rows: String::new(),
        }
    }

    /// Wrap the accumulated rows in the fixed table shell and package the
    /// result. Rows are only appended, never reset, so repeated calls re-wrap
    /// the same body.
    pub fn get_table(&self) -> ReportTable {
        let mut table = String::new();
        table.push_str("<table id=\"easyreport\" class=\"easyreport\">");
        table.push_str(&self.table_rows);
        table.push_str("</table>");
        ReportTable::new(
            table,
            self.parameter.sql_text().to_string(),
            self.data_set.rows().len(),
        )
    }

    /// Emit the `<thead>` section: one header row per column-tree level.
    ///
    /// Fixed-left columns appear once in row 0 and span all header rows when
    /// the tree is deeper than one level. Tree cells carry a colspan only
    /// when they cover more than one leaf column.
    pub fn draw_table_header_rows(&mut self) {
        let data_set = self.data_set;
        let left_fixed_columns = data_set.meta_data().left_fixed_columns();
        let right_column_tree = data_set.meta_data().right_column_tree();
        let row_count = right_column_tree.depth();
        let row_span = if row_count > 1 {
            format!(" rowspan=\"{}\"", row_count)
        } else {
            String::new()
        };

        self.table_rows.push_str("<thead>");
        for row_index in 0..row_count {
            self.table_rows.push_str("<tr class=\"easyreport-header\">");
            if row_index == 0 {
                for left_column in left_fixed_columns {
                    self.table_rows
                        .push_str(&format!("<th{}>{}</th>", row_span, left_column.text()));
                }
            }
            for right_column in right_column_tree.nodes_by_level(row_index) {
                let col_span = if right_column.spans() > 1 {
                    format!(" colspan=\"{}\"", right_column.spans())
                } else {
                    String::new()
                };
                self.table_rows
                    .push_str(&format!("<th{}>{}</th>", col_span, right_column.value()));
            }
            self.table_rows.push_str("</tr>");
        }
        self.table_rows.push_str("</thead>");
    }

    /// Emit all body rows: fixed outline cells first (threading the last-path
    /// cursor through the policy when spanning), then one `<td>` per data cell.
    pub fn draw_table_body_rows(&mut self, policy: &dyn RowSpanPolicy, is_row_span: bool) {
        let data_set = self.data_set;
        let path_node_map = Self::path_node_map(data_set.meta_data().row_tree());
        let mut last_node_paths: Option<Vec<String>> = None;
        for row in data_set.rows() {
            self.table_rows.push_str("<tr>");
            last_node_paths = self.draw_left_fixed_column(
                &path_node_map,
                last_node_paths.as_deref(),
                row.node(),
                is_row_span,
                policy,
            );
            for cell in row.cells() {
                self.table_rows.push_str(&format!("<td>{}</td>", cell));
            }
            self.table_rows.push_str("</tr>");
        }
    }

    /// Emit the left fixed cells for one body row.
    ///
    /// In non-spanning mode every row repeats its outline text literally and
    /// no state is carried (`None`). In spanning mode the policy decides
    /// which segments to emit and returns the cursor for the next row.
    /// An empty path yields no cells at all.
    pub fn draw_left_fixed_column(
        &mut self,
        path_node_map: &HashMap<String, ColumnTreeNode>,
        last_node_paths: Option<&[String]>,
        row_node: &ColumnTreeNode,
        is_row_span: bool,
        policy: &dyn RowSpanPolicy,
    ) -> Option<Vec<String>> {
        let separator = self.data_set.meta_data().path_separator();
        if is_row_span {
            return policy.draw_row_span_column(
                &mut self.table_rows,
                path_node_map,
                last_node_paths,
                row_node,
                separator,
            );
        }

        if row_node.path().is_empty() {
            return None;
        }
        let segments: Vec<&str> = row_node.path().split(separator).collect();

        let level = if segments.len() > 1 { segments.len() - 1 } else { 1 };
        for segment in &segments[..level] {
            self.table_rows.push_str(&format!(
                "<td class=\"easyreport-fixed-column\">{}</td>",
                segment
            ));
        }
        None
    }

    /// Index every node of a tree by its path, visiting level by level.
    /// Pure lookup structure for the row-span body renderer.
    pub fn path_node_map(tree: &ColumnTree) -> HashMap<String, ColumnTreeNode> {
        let mut path_node_map = HashMap::new();
        for level in 0..tree.depth() {
            for node in tree.nodes_by_level(level) {
                path_node_map.insert(node.path().to_string(), node.clone());
            }
        }
        path_node_map
    }
}
