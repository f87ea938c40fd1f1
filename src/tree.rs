//! 报表列树模块, 管理表头和行标签的层级结构

use serde::{Deserialize, Serialize};

/// 列树的一个结点
///
/// 结点构造完成后不可变, 通过getter方法访问各属性
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTreeNode {
    /// 显示文本
    value: String,
    /// 树路径, 由分隔符连接的祖先链, 在整棵树中唯一
    path: String,
    /// 跨度, 即该结点覆盖的叶子列数 (对应colspan)
    spans: usize,
    /// 层级, 根层为0
    level: usize,
}

impl ColumnTreeNode {
    pub fn new(value: impl Into<String>, path: impl Into<String>, spans: usize, level: usize) -> Self {
        Self {
            value: value.into(),
            path: path.into(),
            spans,
            level,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn spans(&self) -> usize {
        self.spans
    }

    pub fn level(&self) -> usize {
        self.level
    }
}

/// 嵌套的列分组定义, 用于构造列树
///
/// 例如：`{"text": "2023", "children": [{"text": "Q1"}, {"text": "Q2"}]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub text: String,
    #[serde(default)]
    pub children: Vec<ColumnDef>,
}

impl ColumnDef {
    /// 创建叶子列定义
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// 创建带子列的分组定义
    pub fn group(text: impl Into<String>, children: Vec<ColumnDef>) -> Self {
        Self {
            text: text.into(),
            children,
        }
    }
}

/// 报表列树, 按层级分组存放所有结点
///
/// 同一层级内的结点保持文档顺序 (从左到右),
/// 表头单元格与其下方的数据列依赖这个顺序对齐
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTree {
    levels: Vec<Vec<ColumnTreeNode>>,
}

impl ColumnTree {
    /// 直接从分层的结点列表构造列树
    pub fn from_levels(levels: Vec<Vec<ColumnTreeNode>>) -> Self {
        Self { levels }
    }

    /// 从嵌套的列定义构造列树
    ///
    /// 结点路径为祖先链文本依次拼接, 每段后跟一个分隔符,
    /// 例如根下的"2023"路径为"2023/", 其子结点"Q1"路径为"2023/Q1/"。
    /// 分组结点的spans等于其子树的叶子数, 叶子结点spans为1。
    pub fn from_defs(defs: &[ColumnDef], separator: char) -> Self {
        let mut levels: Vec<Vec<ColumnTreeNode>> = Vec::new();
        Self::visit_defs(defs, "", 0, separator, &mut levels);
        Self { levels }
    }

    /// 递归访问列定义, 返回该组定义覆盖的叶子总数
    fn visit_defs(
        defs: &[ColumnDef],
        parent_path: &str,
        level: usize,
        separator: char,
        levels: &mut Vec<Vec<ColumnTreeNode>>,
    ) -> usize {
        let mut total_spans = 0;
        for def in defs {
            let path = format!("{}{}{}", parent_path, def.text, separator);
            let spans = if def.children.is_empty() {
                1
            } else {
                Self::visit_defs(&def.children, &path, level + 1, separator, levels)
            };
            while levels.len() <= level {
                levels.push(Vec::new());
            }
            levels[level].push(ColumnTreeNode::new(def.text.clone(), path, spans, level));
            total_spans += spans;
        }
        total_spans
    }

    /// 树的深度, 即层级总数
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// 返回指定层级的所有结点, 保持从左到右的文档顺序
    pub fn nodes_by_level(&self, level: usize) -> &[ColumnTreeNode] {
        &self.levels[level]
    }
}
