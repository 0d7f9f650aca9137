use crate::model::{Block, BlockId};

/// Column-then-top-to-bottom reading order inference, for callers whose OCR
/// provider does not already supply one. OCR ingestion is out of scope for
/// this crate (§1); the Page Layout Driver never calls this itself — it is
/// offered to orchestration code sitting in front of the driver.
///
/// Grouped by x-position with a 10% page-width tolerance, columns sorted
/// left to right, blocks within a column sorted top to bottom.
pub fn infer_reading_order(blocks: &[Block], page_width: f64) -> Vec<BlockId> {
    if blocks.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .y
            .partial_cmp(&b.bbox.y)
            .unwrap()
            .then(a.bbox.x.partial_cmp(&b.bbox.x).unwrap())
    });

    let tolerance = page_width * 0.1;
    let mut columns: Vec<Vec<&Block>> = Vec::new();
    let mut current: Vec<&Block> = Vec::new();

    for block in sorted {
        if current.is_empty() {
            current.push(block);
            continue;
        }
        let avg_x: f64 = current.iter().map(|b| b.bbox.x).sum::<f64>() / current.len() as f64;
        if (block.bbox.x - avg_x).abs() < tolerance {
            current.push(block);
        } else {
            columns.push(std::mem::take(&mut current));
            current.push(block);
        }
    }
    if !current.is_empty() {
        columns.push(current);
    }

    columns.sort_by(|a, b| {
        let avg_a: f64 = a.iter().map(|bl| bl.bbox.x).sum::<f64>() / a.len() as f64;
        let avg_b: f64 = b.iter().map(|bl| bl.bbox.x).sum::<f64>() / b.len() as f64;
        avg_a.partial_cmp(&avg_b).unwrap()
    });

    let mut order = Vec::new();
    for mut column in columns {
        column.sort_by(|a, b| a.bbox.y.partial_cmp(&b.bbox.y).unwrap());
        order.extend(column.into_iter().map(|b| b.id.clone()));
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockType, BoundingBox};

    fn block(id: &str, x: f64, y: f64) -> Block {
        Block::new(id, BlockType::Paragraph, BoundingBox::new(x, y, 100.0, 50.0), 0, "t")
    }

    #[test]
    fn single_column_top_to_bottom() {
        let blocks = vec![block("a", 10.0, 300.0), block("b", 12.0, 10.0), block("c", 8.0, 150.0)];
        let order = infer_reading_order(&blocks, 1000.0);
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn two_columns_left_to_right() {
        let blocks = vec![
            block("left-top", 10.0, 10.0),
            block("right-top", 600.0, 10.0),
            block("left-bottom", 15.0, 400.0),
            block("right-bottom", 610.0, 400.0),
        ];
        let order = infer_reading_order(&blocks, 1000.0);
        assert_eq!(order, vec!["left-top", "left-bottom", "right-top", "right-bottom"]);
    }

    #[test]
    fn empty_input() {
        assert!(infer_reading_order(&[], 1000.0).is_empty());
    }
}
