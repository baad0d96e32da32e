use anyhow::{bail, Result};
use std::collections::{HashMap, HashSet};

/// One runnable step of a pipeline: a file to execute plus the ids of the
/// operations whose output it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOperation {
    pub id: String,
    pub name: String,
    pub filename: String,
    pub parent_operations: Vec<String>,
}

/// A named set of operations. Insertion order is kept so independent
/// operations run in the order they were declared.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub name: String,
    operations: Vec<PipelineOperation>,
}

impl Pipeline {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            operations: Vec::new(),
        }
    }

    pub fn add_operation(&mut self, operation: PipelineOperation) -> Result<()> {
        if self.operations.iter().any(|op| op.id == operation.id) {
            bail!("duplicate operation id {}", operation.id);
        }
        self.operations.push(operation);
        Ok(())
    }

    pub fn operations(&self) -> &[PipelineOperation] {
        &self.operations
    }
}

/// Order operations so every parent comes before its dependents.
/// Depth-first over the declaration order; a visited set makes circular
/// references terminate with each operation scheduled exactly once.
pub fn sort_operations(pipeline: &Pipeline) -> Result<Vec<&PipelineOperation>> {
    let by_id: HashMap<&str, &PipelineOperation> = pipeline
        .operations()
        .iter()
        .map(|op| (op.id.as_str(), op))
        .collect();

    let mut ordered = Vec::with_capacity(pipeline.operations().len());
    let mut visited = HashSet::new();
    for operation in pipeline.operations() {
        visit_operation(operation, &by_id, &mut ordered, &mut visited)?;
    }
    Ok(ordered)
}

fn visit_operation<'a>(
    operation: &'a PipelineOperation,
    by_id: &HashMap<&str, &'a PipelineOperation>,
    ordered: &mut Vec<&'a PipelineOperation>,
    visited: &mut HashSet<&'a str>,
) -> Result<()> {
    if !visited.insert(operation.id.as_str()) {
        return Ok(());
    }
    for parent_id in &operation.parent_operations {
        match by_id.get(parent_id.as_str()) {
            Some(parent) => visit_operation(parent, by_id, ordered, visited)?,
            None => bail!(
                "operation {} references unknown parent operation {parent_id}",
                operation.id
            ),
        }
    }
    ordered.push(operation);
    Ok(())
}
