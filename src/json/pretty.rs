use crate::ast::{Block, Document, Value};

use super::value_to_json;

/// Render a document as indented JSON text.
///
/// Objects and mixed arrays get one member per line; arrays made only of
/// scalars stay on one line (`[1, 2, 3]`). An `indent` of 0 still breaks
/// lines but adds no leading spaces.
pub fn to_json_string(doc: &Document, indent: usize) -> String {
    let mut out = String::new();
    write_block(&mut out, &doc.entries, 0, indent);
    out
}

fn write_value(out: &mut String, value: &Value, level: usize, indent: usize) {
    match value {
        Value::Block(block) => write_block(out, block, level, indent),
        Value::Array(items) => write_array(out, items, level, indent),
        scalar => out.push_str(&value_to_json(scalar).to_string()),
    }
}

fn write_block(out: &mut String, block: &Block, level: usize, indent: usize) {
    if block.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (i, (key, value)) in block.iter().enumerate() {
        push_indent(out, (level + 1) * indent);
        out.push_str(&serde_json::Value::String(key.clone()).to_string());
        out.push_str(": ");
        write_value(out, value, level + 1, indent);
        if i + 1 < block.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, level * indent);
    out.push('}');
}

fn write_array(out: &mut String, items: &[Value], level: usize, indent: usize) {
    if items.iter().all(Value::is_scalar) {
        let parts: Vec<String> = items.iter().map(|v| value_to_json(v).to_string()).collect();
        out.push('[');
        out.push_str(&parts.join(", "));
        out.push(']');
        return;
    }

    out.push_str("[\n");
    for (i, item) in items.iter().enumerate() {
        push_indent(out, (level + 1) * indent);
        write_value(out, item, level + 1, indent);
        if i + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, level * indent);
    out.push(']');
}

fn push_indent(out: &mut String, width: usize) {
    out.extend(std::iter::repeat_n(' ', width));
}
