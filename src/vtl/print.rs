/// Deterministic pretty-printer for mapping-template expression trees
///
/// Identical trees always print identical text: rendering follows the
/// structural order of the tree and nothing else.
use crate::vtl::expr::Expression;

const INDENT: usize = 2;

/// Print a template wrapped in a named comment header.
pub fn print_block(label: &str, expr: &Expression) -> String {
    format!(
        "## [Start] {label}. **\n{}\n## [End] {label}. **",
        print(expr)
    )
}

/// Print an expression tree as template text.
pub fn print(expr: &Expression) -> String {
    print_at(expr, 0)
}

fn pad(indent: usize) -> String {
    " ".repeat(indent)
}

fn print_at(expr: &Expression, indent: usize) -> String {
    match expr {
        Expression::Str(s) => format!("\"{}\"", s),
        Expression::Int(i) => i.to_string(),
        Expression::Bool(b) => b.to_string(),
        Expression::Null => "null".to_string(),
        Expression::Raw(s) => s.clone(),
        Expression::Ref(name) => format!("${}", name),
        Expression::Obj(pairs) => print_obj(pairs, indent),
        Expression::List(items) => {
            let inner: Vec<_> = items.iter().map(|i| print_at(i, indent)).collect();
            format!("[{}]", inner.join(", "))
        }
        Expression::MethodCall { target, args } => {
            let args: Vec<_> = args.iter().map(|a| print_at(a, indent)).collect();
            format!("{}({})", print_at(target, indent), args.join(", "))
        }
        Expression::Quiet(inner) => format!("$util.qr({})", print_at(inner, indent)),
        Expression::ToJson(inner) => format!("$util.toJson({})", print_at(inner, indent)),
        Expression::Set { target, value } => format!(
            "#set( {} = {} )",
            print_at(target, indent),
            print_at(value, indent)
        ),
        Expression::If { condition, then } => format!(
            "#if( {} )\n{}{}\n{}#end",
            print_at(condition, indent),
            pad(indent + INDENT),
            print_at(then, indent + INDENT),
            pad(indent)
        ),
        Expression::IfElse {
            condition,
            then,
            otherwise,
        } => format!(
            "#if( {} )\n{}{}\n{}#else\n{}{}\n{}#end",
            print_at(condition, indent),
            pad(indent + INDENT),
            print_at(then, indent + INDENT),
            pad(indent),
            pad(indent + INDENT),
            print_at(otherwise, indent + INDENT),
            pad(indent)
        ),
        Expression::ForEach {
            item,
            collection,
            body,
        } => {
            let body_lines: Vec<_> = body
                .iter()
                .map(|e| format!("{}{}", pad(indent + INDENT), print_at(e, indent + INDENT)))
                .collect();
            format!(
                "#foreach( {} in {} )\n{}\n{}#end",
                print_at(item, indent),
                print_at(collection, indent),
                body_lines.join("\n"),
                pad(indent)
            )
        }
        Expression::Compound(statements) => {
            let lines: Vec<_> = statements
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    // first statement sits on the caller's line; the rest get
                    // the current indent prefix
                    if i == 0 {
                        print_at(e, indent)
                    } else {
                        format!("{}{}", pad(indent), print_at(e, indent))
                    }
                })
                .collect();
            lines.join("\n")
        }
        Expression::Comment(text) => format!("## {}", text),
        Expression::Not(inner) => format!("!{}", print_at(inner, indent)),
        Expression::And(items) => {
            let inner: Vec<_> = items.iter().map(|i| print_at(i, indent)).collect();
            format!("({})", inner.join(" && "))
        }
        Expression::Equals(left, right) => format!(
            "{} == {}",
            print_at(left, indent),
            print_at(right, indent)
        ),
        Expression::IsNullOrEmpty(inner) => {
            format!("$util.isNullOrEmpty({})", print_at(inner, indent))
        }
    }
}

fn print_obj(pairs: &[(String, Expression)], indent: usize) -> String {
    if pairs.is_empty() {
        return "{}".to_string();
    }
    let inner: Vec<_> = pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}\"{}\": {}",
                pad(indent + INDENT),
                key,
                print_at(value, indent + INDENT)
            )
        })
        .collect();
    format!("{{\n{}\n{}}}", inner.join(",\n"), pad(indent))
}
