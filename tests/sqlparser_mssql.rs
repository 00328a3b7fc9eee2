// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![warn(clippy::all)]
//! End-to-end parsing tests for Microsoft SQL Server's T-SQL dialect.

use tsqlparser::ast::*;
use tsqlparser::dialect::MsSqlDialect;
use tsqlparser::parser::parse;
use tsqlparser::test_utils::tsql;

fn ms() -> MsSqlDialect {
    MsSqlDialect::default()
}

// ---- §8 concrete end-to-end scenarios --------------------------------

#[test]
fn scenario_select_top_between_order_by() {
    let stmt = tsql().verified_stmt("SELECT TOP 10 a, b, c FROM t WHERE x BETWEEN 1 AND 10 ORDER BY a DESC");
    match stmt {
        Statement::Query(query) => {
            let top = match &*query.body {
                SetExpr::Select(select) => {
                    assert_eq!(select.projection.len(), 3);
                    select.top.clone().expect("TOP clause")
                }
                other => panic!("expected a SELECT body, got {other:?}"),
            };
            assert_eq!(top.quantity, Expr::Value(Value::Number("10".to_string())));
            let selection = match &*query.body {
                SetExpr::Select(select) => select.selection.clone().expect("WHERE clause"),
                _ => unreachable!(),
            };
            match selection {
                Expr::Between { negated, low, high, .. } => {
                    assert!(!negated);
                    assert_eq!(*low, Expr::Value(Value::Number("1".to_string())));
                    assert_eq!(*high, Expr::Value(Value::Number("10".to_string())));
                }
                other => panic!("expected BETWEEN, got {other:?}"),
            }
            assert_eq!(query.order_by.len(), 1);
            assert_eq!(query.order_by[0].descending, Some(true));
        }
        other => panic!("expected a query statement, got {other:?}"),
    }
}

#[test]
fn scenario_with_cte() {
    let stmt = tsql().verified_stmt("WITH C AS (SELECT 1 AS A) SELECT * FROM C");
    match stmt {
        Statement::Query(query) => {
            let with = query.with.expect("WITH prologue");
            let ctes = match with {
                With::Ctes(ctes) => ctes,
                other => panic!("expected a CTE list, got {other:?}"),
            };
            assert_eq!(ctes.len(), 1);
            let cte = &ctes[0];
            assert_eq!(cte.alias.name.value, "C");
            match &*cte.query.body {
                SetExpr::Select(select) => {
                    assert_eq!(select.projection.len(), 1);
                    match &select.projection[0] {
                        SelectItem::ExprWithAlias(ExprWithAlias { expr, alias }) => {
                            assert_eq!(*expr, Expr::Value(Value::Number("1".to_string())));
                            assert_eq!(alias.as_ref().unwrap().value, "A");
                        }
                        other => panic!("expected an aliased projection, got {other:?}"),
                    }
                }
                other => panic!("expected a SELECT body for the CTE, got {other:?}"),
            }
        }
        other => panic!("expected a query statement, got {other:?}"),
    }
}

#[test]
fn with_xmlnamespaces_prologue() {
    let stmt =
        tsql().verified_stmt("WITH XMLNAMESPACES ('uri' AS prefix) SELECT 1 FROM T");
    match stmt {
        Statement::Query(query) => {
            let with = query.with.expect("WITH prologue");
            match with {
                With::XmlNamespaces(namespaces) => {
                    assert_eq!(namespaces.len(), 1);
                    let ns = &namespaces[0];
                    assert!(!ns.is_default);
                    assert_eq!(ns.alias.as_ref().unwrap().value, "prefix");
                    assert_eq!(ns.uri, Expr::Value(Value::SingleQuotedString("uri".to_string())));
                }
                other => panic!("expected an XMLNAMESPACES prologue, got {other:?}"),
            }
        }
        other => panic!("expected a query statement, got {other:?}"),
    }
}

#[test]
fn scenario_merge_matched_and_not_matched() {
    let stmt = tsql().one_statement_parses_to(
        "MERGE INTO T AS t USING S AS s ON t.ID = s.ID WHEN MATCHED THEN UPDATE SET t.N = s.N WHEN NOT MATCHED THEN INSERT (ID, N) VALUES (s.ID, s.N)",
        "MERGE T AS t USING S AS s ON t.ID = s.ID WHEN MATCHED THEN UPDATE SET t.N = s.N WHEN NOT MATCHED THEN INSERT (ID, N) VALUES (s.ID, s.N)",
    );
    match stmt {
        Statement::Merge(merge) => {
            assert_eq!(target_alias(&merge.target), "t");
            assert_eq!(target_alias(&merge.source), "s");
            assert_eq!(merge.clauses.len(), 2);
            assert!(merge.clauses[0].matched);
            assert!(matches!(merge.clauses[0].action, MergeAction::Update { .. }));
            assert!(!merge.clauses[1].matched);
            assert!(matches!(merge.clauses[1].action, MergeAction::Insert { .. }));
        }
        other => panic!("expected a MERGE statement, got {other:?}"),
    }
}

#[test]
fn scenario_create_table_identity_and_decimal() {
    let stmt = tsql().verified_stmt("CREATE TABLE Orders (ID INT IDENTITY(1, 1) PRIMARY KEY, Amount DECIMAL(10, 2))");
    match stmt {
        Statement::CreateTable(create) => {
            assert_eq!(create.columns.len(), 2);
            let id_column = &create.columns[0];
            assert!(id_column
                .options
                .iter()
                .any(|o| matches!(&o.option, ColumnOption::Identity { seed: Some(s), increment: Some(i) }
                    if *s == Expr::Value(Value::Number("1".to_string()))
                        && *i == Expr::Value(Value::Number("1".to_string())))));
            assert!(id_column
                .options
                .iter()
                .any(|o| matches!(o.option, ColumnOption::Unique { is_primary: true })));
            assert_eq!(
                create.columns[1].data_type,
                DataType::Decimal(ExactNumberInfo::PrecisionAndScale(10, 2))
            );
        }
        other => panic!("expected a CREATE TABLE statement, got {other:?}"),
    }
}

#[test]
fn scenario_row_number_over_partition_order() {
    let stmt = tsql().verified_stmt("SELECT ROW_NUMBER() OVER (PARTITION BY Dept ORDER BY Salary DESC) AS R FROM E");
    match stmt {
        Statement::Query(query) => match &*query.body {
            SetExpr::Select(select) => match &select.projection[0] {
                SelectItem::ExprWithAlias(ExprWithAlias { expr, alias }) => {
                    assert_eq!(alias.as_ref().unwrap().value, "R");
                    match expr {
                        Expr::Function(func) => {
                            let over = func.over.as_ref().expect("OVER clause");
                            match over {
                                OverClause::WindowSpec(spec) => {
                                    assert_eq!(spec.partition_by.len(), 1);
                                    assert_eq!(spec.order_by.len(), 1);
                                    assert_eq!(spec.order_by[0].descending, Some(true));
                                }
                                OverClause::NamedWindow(_) => panic!("expected an inline window spec"),
                            }
                        }
                        other => panic!("expected a function call, got {other:?}"),
                    }
                }
                other => panic!("expected an aliased projection, got {other:?}"),
            },
            other => panic!("expected a SELECT body, got {other:?}"),
        },
        other => panic!("expected a query statement, got {other:?}"),
    }
}

#[test]
fn scenario_delete_output_join() {
    let stmt = tsql().verified_stmt("DELETE u OUTPUT deleted.* FROM Users u JOIN ToDelete t ON u.ID = t.UserID");
    match stmt {
        Statement::Delete(delete) => {
            assert_eq!(target_alias(&delete.table), "u");
            assert!(delete.output.is_some());
            assert_eq!(delete.from.len(), 1);
            let top_level = &delete.from[0];
            assert_eq!(target_alias(&top_level.relation), "Users");
            assert_eq!(top_level.joins.len(), 1);
            assert_eq!(target_alias(&top_level.joins[0].relation), "ToDelete");
            assert!(matches!(top_level.joins[0].join_operator, JoinOperator::Inner(JoinConstraint::On(_))));
        }
        other => panic!("expected a DELETE statement, got {other:?}"),
    }
}

fn target_alias(factor: &TableFactor) -> String {
    match factor {
        TableFactor::Table { name, alias: Some(alias), .. } => alias.name.value.clone(),
        TableFactor::Table { name, alias: None, .. } => name.to_string(),
        other => panic!("expected a named table, got {other:?}"),
    }
}

// ---- §8 testable invariants -------------------------------------------

#[test]
fn monotone_token_positions() {
    let result = parse(&ms(), "SELECT a, b\nFROM t WHERE a = 1");
    assert!(result.errors.is_empty());
    // Re-tokenizing the same buffer directly lets us walk positions in order.
    let mut tokenizer = tsqlparser::tokenizer::Tokenizer::new(&ms(), "SELECT a, b\nFROM t WHERE a = 1");
    let (tokens, errors) = tokenizer.tokenize();
    assert!(errors.is_empty());
    for pair in tokens.windows(2) {
        assert!(pair[1].location > pair[0].location, "{:?} did not advance past {:?}", pair[1], pair[0]);
    }
}

#[test]
fn keyword_case_insensitivity() {
    for variant in ["select", "SELECT", "Select", "sElEcT"] {
        let sql = format!("{variant} 1");
        let result = parse(&ms(), &sql);
        assert!(result.errors.is_empty(), "{sql:?} failed to parse: {:?}", result.errors);
        assert_eq!(result.program.len(), 1);
        assert!(matches!(result.program[0], Statement::Query(_)));
    }
}

#[test]
fn qualified_identifier_is_never_empty() {
    let stmt = tsql().verified_stmt("SELECT a.b.c FROM d");
    match stmt {
        Statement::Query(query) => match &*query.body {
            SetExpr::Select(select) => match &select.projection[0] {
                SelectItem::UnnamedExpr(Expr::CompoundIdentifier(parts)) => {
                    assert!(!parts.is_empty());
                    assert_eq!(parts.len(), 3);
                }
                other => panic!("expected a compound identifier, got {other:?}"),
            },
            _ => unreachable!(),
        },
        _ => unreachable!(),
    }
}

#[test]
fn join_symmetry_cross_and_apply_have_no_condition() {
    let cross = tsql().verified_stmt("SELECT * FROM a CROSS JOIN b");
    let apply = tsql().verified_stmt("SELECT * FROM a CROSS APPLY dbo.Fn(a.Id)");
    for stmt in [cross, apply] {
        match stmt {
            Statement::Query(query) => match &*query.body {
                SetExpr::Select(select) => {
                    let join = &select.from[0].joins[0];
                    match &join.join_operator {
                        JoinOperator::Cross | JoinOperator::CrossApply | JoinOperator::OuterApply => {}
                        other => panic!("expected CROSS/APPLY, got {other:?}"),
                    }
                }
                _ => unreachable!(),
            },
            _ => unreachable!(),
        }
    }
}

#[test]
fn join_symmetry_inner_outer_require_a_condition() {
    let stmt = tsql().verified_stmt("SELECT * FROM a LEFT JOIN b ON a.id = b.id");
    match stmt {
        Statement::Query(query) => match &*query.body {
            SetExpr::Select(select) => {
                let join = &select.from[0].joins[0];
                match &join.join_operator {
                    JoinOperator::LeftOuter(JoinConstraint::On(_)) => {}
                    other => panic!("expected LEFT JOIN ... ON, got {other:?}"),
                }
            }
            _ => unreachable!(),
        },
        _ => unreachable!(),
    }
}

#[test]
fn case_expression_requires_at_least_one_when() {
    let stmt = tsql().verified_stmt("SELECT CASE WHEN a = 1 THEN 'x' ELSE 'y' END FROM t");
    match stmt {
        Statement::Query(query) => match &*query.body {
            SetExpr::Select(select) => match &select.projection[0] {
                SelectItem::UnnamedExpr(Expr::Case { conditions, results, else_result, .. }) => {
                    assert!(!conditions.is_empty());
                    assert_eq!(conditions.len(), results.len());
                    assert!(else_result.is_some());
                }
                other => panic!("expected a CASE expression, got {other:?}"),
            },
            _ => unreachable!(),
        },
        _ => unreachable!(),
    }
}

#[test]
fn round_trip_contains_fixed_keywords() {
    let between = tsql().verified_stmt("SELECT * FROM t WHERE a BETWEEN 1 AND 10");
    let rendered = between.to_string();
    assert!(rendered.contains("BETWEEN"));
    assert!(rendered.contains("AND"));

    let join = tsql().verified_stmt("SELECT * FROM a LEFT JOIN b ON a.id = b.id");
    let rendered = join.to_string();
    assert!(rendered.contains("LEFT"));
    assert!(rendered.contains("JOIN"));
}

#[test]
fn diagnostic_positions_are_one_based_and_labeled() {
    let result = parse(&ms(), "SELECT FROM");
    assert!(!result.errors.is_empty());
    for error in &result.errors {
        let message = error.to_string();
        assert!(message.contains("line "), "{message:?} missing line marker");
        assert!(message.contains("col "), "{message:?} missing col marker");
    }
}

// ---- additional statement coverage ------------------------------------

#[test]
fn set_operations_union_all() {
    tsql().verified_stmt("SELECT a FROM t1 UNION ALL SELECT a FROM t2");
}

#[test]
fn begin_dialog_conversation() {
    tsql().verified_stmt("BEGIN DIALOG CONVERSATION @h FROM SERVICE [OrderService] TO SERVICE 'TargetService' ON CONTRACT [OrderContract]");
}

#[test]
fn send_and_end_conversation() {
    let stmt = tsql().verified_stmt("SEND ON CONVERSATION @h MESSAGE TYPE [OrderMessage] ('payload')");
    assert!(matches!(stmt, Statement::ServiceBroker(_)));
    let stmt = tsql().verified_stmt("END CONVERSATION @h");
    assert!(matches!(stmt, Statement::ServiceBroker(_)));
}

#[test]
fn cursor_declare_open_fetch_close_deallocate() {
    let sql = r#"
        DECLARE cur CURSOR FOR SELECT Id FROM Orders;
        OPEN cur;
        FETCH NEXT FROM cur INTO @id;
        CLOSE cur;
        DEALLOCATE cur;
    "#;
    let result = parse(&ms(), sql);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.program.len(), 5);
}

#[test]
fn try_catch_block() {
    let sql = "BEGIN TRY SELECT 1 / 0 END TRY BEGIN CATCH PRINT 'error' END CATCH";
    let result = parse(&ms(), sql);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.program.len(), 1);
    assert!(matches!(result.program[0], Statement::TryCatch(_)));
}

#[test]
fn method_call_and_static_method_call_parse() {
    let expr = tsql().verified_expr("@Geo.STDistance(@Other)");
    match expr {
        Expr::MethodCall { method, .. } => assert_eq!(method.value, "STDistance"),
        other => panic!("expected a method call, got {other:?}"),
    }
    let expr = tsql().verified_expr("geography::Parse('POINT(1 1)')");
    match expr {
        Expr::StaticMethodCall { type_name, method, .. } => {
            assert_eq!(type_name.to_string(), "geography");
            assert_eq!(method.value, "Parse");
        }
        other => panic!("expected a static method call, got {other:?}"),
    }
}

#[test]
fn error_recovery_resumes_at_next_statement() {
    let result = parse(&ms(), "SELECT FROM; SELECT 1");
    assert!(!result.errors.is_empty());
    assert_eq!(result.program.len(), 1);
    assert!(matches!(result.program[0], Statement::Query(_)));
}
