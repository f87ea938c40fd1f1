//! 透视表样式的HTML报表渲染引擎
//!
//! 核心是把层级化的列定义转换为表格标记：
//! - 列树 (`tree`) 变成带colspan/rowspan的表头行
//! - 行路径层级变成左侧固定的大纲列, 相同祖先可跨行合并
//!
//! 渲染器不执行SQL、不取数、不分页, 只消费已物化的数据集并产出HTML

pub mod builder;
pub mod config;
pub mod data;
pub mod tree;
