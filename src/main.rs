use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use report_renderer::builder::{MergeAncestorsPolicy, ReportBuilder};
use report_renderer::config::ReportDefinition;
use report_renderer::data::{ReportDataRow, ReportDataSet, ReportParameter, ReportTable};

/// 根据报表定义渲染一张演示表格
///
/// 数据单元格用占位值填充, 行数据来自行树的叶子结点
fn render_definition(definition: ReportDefinition) -> ReportTable {
    let sql_text = definition.sql_text.clone();
    let meta_data = definition.into_meta_data();

    // 每行的数据单元格数等于列树覆盖的叶子列总数
    let data_cell_count: usize = meta_data
        .right_column_tree()
        .nodes_by_level(0)
        .iter()
        .map(|n| n.spans())
        .sum();

    // 行数据来自行树最深一层的结点; 没有行定义时渲染空表体
    let rows: Vec<ReportDataRow> = if meta_data.row_tree().depth() == 0 {
        Vec::new()
    } else {
        meta_data
            .row_tree()
            .nodes_by_level(meta_data.row_tree().depth() - 1)
            .iter()
            .map(|node| ReportDataRow::new(node.clone(), vec!["0".to_string(); data_cell_count]))
            .collect()
    };

    let data_set = ReportDataSet::new(meta_data, rows);
    let parameter = ReportParameter::new(sql_text);

    let mut builder = ReportBuilder::new(&data_set, &parameter);
    builder.draw_table_header_rows();
    builder.draw_table_body_rows(&MergeAncestorsPolicy, true);
    builder.get_table()
}

fn main() -> Result<()> {
    println!("--- Report Renderer: 列树到HTML表格的渲染器 ---");

    // 1. 示例报表定义
    let sample = r#"{
        "sql_text": "select region, city, year, amount from sales",
        "left_fixed_columns": ["地区"],
        "columns": [
            {"text": "2023", "children": [{"text": "上半年"}, {"text": "下半年"}]},
            {"text": "2024"}
        ],
        "rows": [
            {"text": "华东", "children": [{"text": "上海"}, {"text": "南京"}]},
            {"text": "华北", "children": [{"text": "北京"}]}
        ]
    }"#;
    println!("\n[示例定义]:\n{}\n", sample);

    // 2. 解析定义并渲染
    println!("[步骤 1]: 解析报表定义...");
    let definition: ReportDefinition = serde_json::from_str(sample)?;
    println!("✓ 成功解析, 列树含 {} 组顶层列", definition.columns.len());

    println!("\n[步骤 2]: 渲染HTML表格...");
    let table = render_definition(definition);
    println!("✓ 渲染完成, 共 {} 行数据", table.row_count());
    println!("\n[生成的HTML]:");
    println!("{}", table.html());
    println!("\n[来源定义文本]: {}", table.sql_text());

    // 3. 交互模式：从JSON文件加载报表定义并渲染
    println!("\n--- 交互模式 ---");
    println!("输入报表定义JSON文件路径进行渲染, 输入 exit 退出");

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("report> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case("exit") {
                    break;
                }
                rl.add_history_entry(line)?;
                match ReportDefinition::from_json_file(line) {
                    Ok(definition) => {
                        let table = render_definition(definition);
                        println!("✅ 渲染完成, 共 {} 行数据", table.row_count());
                        println!("{}", table.html());
                    }
                    Err(e) => {
                        println!("❌ {}", e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                println!("读取输入失败: {}", e);
                break;
            }
        }
    }

    Ok(())
}
