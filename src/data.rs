//! 报表数据模型, 定义渲染所需的输入和输出值对象

use serde::Serialize;

use crate::tree::{ColumnTree, ColumnTreeNode};

/// 固定列, 即报表左侧不参与层级分组的列头
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDataColumn {
    text: String,
}

impl ReportDataColumn {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 一行报表数据：行树结点 (携带该行的大纲路径) 加上已格式化的数据单元格
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDataRow {
    node: ColumnTreeNode,
    cells: Vec<String>,
}

impl ReportDataRow {
    pub fn new(node: ColumnTreeNode, cells: Vec<String>) -> Self {
        Self { node, cells }
    }

    pub fn node(&self) -> &ColumnTreeNode {
        &self.node
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// 报表元数据：左侧固定列、右侧列树、行树和路径分隔符
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetaData {
    left_fixed_columns: Vec<ReportDataColumn>,
    right_column_tree: ColumnTree,
    row_tree: ColumnTree,
    path_separator: char,
}

impl ReportMetaData {
    pub fn new(
        left_fixed_columns: Vec<ReportDataColumn>,
        right_column_tree: ColumnTree,
        row_tree: ColumnTree,
        path_separator: char,
    ) -> Self {
        Self {
            left_fixed_columns,
            right_column_tree,
            row_tree,
            path_separator,
        }
    }

    pub fn left_fixed_columns(&self) -> &[ReportDataColumn] {
        &self.left_fixed_columns
    }

    pub fn right_column_tree(&self) -> &ColumnTree {
        &self.right_column_tree
    }

    pub fn row_tree(&self) -> &ColumnTree {
        &self.row_tree
    }

    pub fn path_separator(&self) -> char {
        self.path_separator
    }
}

/// 报表数据集, 持有元数据和全部行数据
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDataSet {
    meta_data: ReportMetaData,
    rows: Vec<ReportDataRow>,
}

impl ReportDataSet {
    pub fn new(meta_data: ReportMetaData, rows: Vec<ReportDataRow>) -> Self {
        Self { meta_data, rows }
    }

    pub fn meta_data(&self) -> &ReportMetaData {
        &self.meta_data
    }

    pub fn rows(&self) -> &[ReportDataRow] {
        &self.rows
    }
}

/// 报表参数, 携带原始的报表定义文本 (例如来源SQL)
///
/// 渲染核心不解析该文本, 仅原样传递到输出
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParameter {
    sql_text: String,
}

impl ReportParameter {
    pub fn new(sql_text: impl Into<String>) -> Self {
        Self {
            sql_text: sql_text.into(),
        }
    }

    pub fn sql_text(&self) -> &str {
        &self.sql_text
    }
}

/// 渲染结果值对象：完整HTML、原始定义文本和行数
///
/// 一次渲染产出一份, 构造后不可变。可序列化为JSON供宿主应用传输
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    html: String,
    sql_text: String,
    row_count: usize,
}

impl ReportTable {
    pub fn new(html: String, sql_text: String, row_count: usize) -> Self {
        Self {
            html,
            sql_text,
            row_count,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn sql_text(&self) -> &str {
        &self.sql_text
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ColumnDef;

    #[test]
    fn test_report_table_serializes_to_json() {
        let table = ReportTable::new(
            "<table id=\"easyreport\" class=\"easyreport\"></table>".to_string(),
            "select 1".to_string(),
            0,
        );
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["row_count"], 0);
        assert_eq!(json["sql_text"], "select 1");
        assert!(json["html"].as_str().unwrap().starts_with("<table"));
    }

    #[test]
    fn test_meta_data_accessors() {
        let meta = ReportMetaData::new(
            vec![ReportDataColumn::new("Region")],
            ColumnTree::from_defs(&[ColumnDef::leaf("2023")], '/'),
            ColumnTree::from_defs(&[ColumnDef::leaf("East")], '/'),
            '/',
        );
        assert_eq!(meta.left_fixed_columns().len(), 1);
        assert_eq!(meta.left_fixed_columns()[0].text(), "Region");
        assert_eq!(meta.right_column_tree().depth(), 1);
        assert_eq!(meta.path_separator(), '/');
    }
}
