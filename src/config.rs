//! 配置模块，负责加载JSON报表定义文件

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::data::{ReportDataColumn, ReportMetaData};
use crate::tree::{ColumnDef, ColumnTree};

/// 报表定义配置错误
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "配置错误: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

fn default_separator() -> char {
    '/'
}

/// 报表定义结构：来源SQL文本、路径分隔符、左侧固定列和两棵树的嵌套定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDefinition {
    /// 原始报表定义文本 (例如来源SQL), 渲染时原样传递
    pub sql_text: String,
    /// 行路径的分隔符, 默认为 '/'
    #[serde(default = "default_separator")]
    pub path_separator: char,
    /// 左侧固定列的显示文本, 按顺序排列
    #[serde(default)]
    pub left_fixed_columns: Vec<String>,
    /// 右侧表头的嵌套列定义
    pub columns: Vec<ColumnDef>,
    /// 左侧大纲的嵌套行定义
    #[serde(default)]
    pub rows: Vec<ColumnDef>,
}

impl ReportDefinition {
    /// 从JSON文件加载报表定义
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        // 检查文件是否存在
        if !path_ref.exists() {
            return Err(ConfigError::new(format!(
                "报表定义文件不存在: {}",
                path_ref.display()
            )));
        }

        // 读取文件内容
        let content = fs::read_to_string(path_ref)
            .map_err(|e| ConfigError::new(format!(
                "无法读取报表定义文件 {}: {}",
                path_ref.display(),
                e
            )))?;

        // 解析JSON
        let definition: ReportDefinition = serde_json::from_str(&content)
            .map_err(|e| ConfigError::new(format!(
                "无法解析JSON报表定义文件 {}: {}",
                path_ref.display(),
                e
            )))?;

        Ok(definition)
    }

    /// 将定义转换为报表元数据, 构造列树和行树
    pub fn into_meta_data(self) -> ReportMetaData {
        let left_fixed_columns = self
            .left_fixed_columns
            .into_iter()
            .map(ReportDataColumn::new)
            .collect();
        let right_column_tree = ColumnTree::from_defs(&self.columns, self.path_separator);
        let row_tree = ColumnTree::from_defs(&self.rows, self.path_separator);
        ReportMetaData::new(
            left_fixed_columns,
            right_column_tree,
            row_tree,
            self.path_separator,
        )
    }
}
