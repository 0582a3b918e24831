// MiniZinc export: render a CSP as a MiniZinc model and decide it with Gecode

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::{debug, error};

use crate::cnf::Satisfiability;
use crate::csp::{Constraint, ConstraintTag, Csp};
use crate::error::{CspError, Result};

const OUTPUT_SATISFIABLE: &str = "----------\n";
const OUTPUT_UNSATISFIABLE: &str = "=====UNSATISFIABLE=====\n";

fn render_constraint(constraint: &Constraint) -> String {
    let vars = constraint.variables();
    let relation = constraint.relation();
    match constraint.tag() {
        ConstraintTag::Eq if vars.len() == 2 => {
            format!("constraint data[{}] == data[{}];", vars[0], vars[1])
        }
        ConstraintTag::Ne if vars.len() == 2 => {
            format!("constraint data[{}] != data[{}];", vars[0], vars[1])
        }
        ConstraintTag::Is if !relation.is_empty() => {
            let assignments: Vec<String> = vars
                .iter()
                .zip(relation[0].iter())
                .map(|(v, value)| format!("data[{}] = {}", v, value))
                .collect();
            format!("constraint {};", assignments.join(" /\\ "))
        }
        _ if relation.is_empty() => "constraint false;".to_string(),
        _ => {
            let rows: Vec<String> = relation
                .iter()
                .map(|row| {
                    let literals: Vec<String> = vars
                        .iter()
                        .zip(row.iter())
                        .map(|(v, value)| format!("data[{}] == {}", v, value))
                        .collect();
                    format!("{}\n", literals.join(" /\\ "))
                })
                .collect();
            format!("\nconstraint ({});", rows.join(" \\/ "))
        }
    }
}

/// MiniZinc model over one `data` array indexed by CSP variable
pub fn csp_to_minizinc(csp: &Csp) -> String {
    let header = format!(
        "set of int: DOM = 0..{};\nint: n = {};\n\narray [0..n] of var DOM: data;\n",
        csp.domain_size().saturating_sub(1),
        csp.n_variables().saturating_sub(1)
    );
    let footer = "\nsolve satisfy;\noutput [];";
    let body: Vec<String> = csp.constraints().iter().map(render_constraint).collect();
    format!("{}\n{}\n{}", header, body.join("\n"), footer)
}

/// Write the model to `path`, creating parent directories
pub fn write_minizinc(csp: &Csp, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            error!(path = %parent.display(), "failed to create output directory");
            e
        })?;
    }
    fs::write(path, csp_to_minizinc(csp))?;
    debug!(path = %path.display(), constraints = csp.num_constraints(), "wrote MiniZinc model");
    Ok(())
}

/// Map the exact stdout of `minizinc` to a verdict
fn parse_output(output: &str) -> Result<Satisfiability> {
    match output {
        OUTPUT_SATISFIABLE => Ok(Satisfiability::Satisfiable),
        OUTPUT_UNSATISFIABLE => Ok(Satisfiability::Unsatisfiable),
        other => {
            error!(output = other, "unexpected output from MiniZinc");
            Err(CspError::UnexpectedSolverOutput(other.to_string()))
        }
    }
}

/// Export `csp` to `path` and run `minizinc --solver Gecode` on it
pub fn minizinc_is_satisfiable(csp: &Csp, path: &Path) -> Result<Satisfiability> {
    write_minizinc(csp, path)?;
    let output = Command::new("minizinc")
        .arg("--solver")
        .arg("Gecode")
        .arg(path)
        .output()
        .map_err(|e| {
            error!("failed executing MiniZinc: {}", e);
            e
        })?;
    parse_output(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{assignment_constraint, eq_constraint, neq_constraint};
    use crate::relation::{Relation, Tuple};

    #[test]
    fn test_render_eq_ne() {
        assert_eq!(
            render_constraint(&eq_constraint(vec![0, 3], 2)),
            "constraint data[0] == data[3];"
        );
        assert_eq!(
            render_constraint(&neq_constraint(vec![1, 2], 3)),
            "constraint data[1] != data[2];"
        );
    }

    #[test]
    fn test_render_is() {
        let c = assignment_constraint(vec![4], Tuple::from([2])).unwrap();
        assert_eq!(render_constraint(&c), "constraint data[4] = 2;");
        let c = assignment_constraint(vec![0, 1], Tuple::from([1, 0])).unwrap();
        assert_eq!(render_constraint(&c), "constraint data[0] = 1 /\\ data[1] = 0;");
    }

    #[test]
    fn test_render_other() {
        let r = Relation::from_rows([[1, 0], [0, 1]]).unwrap();
        let c = Constraint::new(r, vec![0, 2]).unwrap();
        assert_eq!(
            render_constraint(&c),
            "\nconstraint (data[0] == 1 /\\ data[2] == 0\n \\/ data[0] == 0 /\\ data[2] == 1\n);"
        );
    }

    #[test]
    fn test_render_wide_eq_as_table() {
        let c = eq_constraint(vec![0, 1, 2], 2);
        assert!(render_constraint(&c).starts_with("\nconstraint ("));
    }

    #[test]
    fn test_render_empty_relation() {
        let c = Constraint::new(Relation::new(2, vec![]).unwrap(), vec![0, 1]).unwrap();
        assert_eq!(render_constraint(&c), "constraint false;");
    }

    #[test]
    fn test_csp_to_minizinc() {
        let csp = Csp::new(vec![neq_constraint(vec![0, 1], 3)]);
        assert_eq!(
            csp_to_minizinc(&csp),
            "set of int: DOM = 0..2;\nint: n = 1;\n\narray [0..n] of var DOM: data;\n\n\
             constraint data[0] != data[1];\n\nsolve satisfy;\noutput [];"
        );
    }

    #[test]
    fn test_parse_output() {
        assert_eq!(parse_output("----------\n").unwrap(), Satisfiability::Satisfiable);
        assert_eq!(
            parse_output("=====UNSATISFIABLE=====\n").unwrap(),
            Satisfiability::Unsatisfiable
        );
        assert!(matches!(
            parse_output("=====UNKNOWN=====\n"),
            Err(CspError::UnexpectedSolverOutput(_))
        ));
    }

    #[test]
    fn test_write_minizinc() {
        let dir = std::env::temp_dir().join(format!("polysat-mzn-{}", std::process::id()));
        let path = dir.join("nested").join("model.mzn");
        let csp = Csp::new(vec![eq_constraint(vec![0, 1], 2)]);
        write_minizinc(&csp, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), csp_to_minizinc(&csp));
        fs::remove_dir_all(&dir).unwrap();
    }
}
