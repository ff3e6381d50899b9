/// Mapping-template expression tree
///
/// A small expression algebra for building request/response mapping
/// templates: leaf literals and variable references, compound object/list
/// nodes, method calls, and template control flow. Trees are built in
/// structural order (object pairs are an ordered `Vec`, never a hash map)
/// so the printer's output depends only on how the tree was constructed.

/// One node of a mapping-template expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Str(String),
    Int(i64),
    Bool(bool),
    Null,
    /// Verbatim template text, escaping nothing.
    Raw(String),
    /// A `$variable` reference, dotted paths allowed.
    Ref(String),
    /// Object literal with ordered key/value pairs.
    Obj(Vec<(String, Expression)>),
    List(Vec<Expression>),
    /// `$target(arg, ...)` invocation.
    MethodCall {
        target: Box<Expression>,
        args: Vec<Expression>,
    },
    /// Quiet (void) invocation: the engine discards the return value.
    Quiet(Box<Expression>),
    Set {
        target: Box<Expression>,
        value: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        then: Box<Expression>,
    },
    IfElse {
        condition: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
    ForEach {
        item: Box<Expression>,
        collection: Box<Expression>,
        body: Vec<Expression>,
    },
    /// Statement sequence, printed one per line.
    Compound(Vec<Expression>),
    Comment(String),
    ToJson(Box<Expression>),
    Not(Box<Expression>),
    And(Vec<Expression>),
    Equals(Box<Expression>, Box<Expression>),
    IsNullOrEmpty(Box<Expression>),
}

pub fn str(value: impl Into<String>) -> Expression {
    Expression::Str(value.into())
}

pub fn int(value: i64) -> Expression {
    Expression::Int(value)
}

pub fn boolean(value: bool) -> Expression {
    Expression::Bool(value)
}

pub fn null() -> Expression {
    Expression::Null
}

pub fn raw(value: impl Into<String>) -> Expression {
    Expression::Raw(value.into())
}

pub fn reference(name: impl Into<String>) -> Expression {
    Expression::Ref(name.into())
}

pub fn obj(pairs: Vec<(&str, Expression)>) -> Expression {
    Expression::Obj(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

pub fn list(items: Vec<Expression>) -> Expression {
    Expression::List(items)
}

pub fn method_call(target: Expression, args: Vec<Expression>) -> Expression {
    Expression::MethodCall {
        target: Box::new(target),
        args,
    }
}

pub fn qref(expr: Expression) -> Expression {
    Expression::Quiet(Box::new(expr))
}

pub fn set(target: Expression, value: Expression) -> Expression {
    Expression::Set {
        target: Box::new(target),
        value: Box::new(value),
    }
}

pub fn iff(condition: Expression, then: Expression) -> Expression {
    Expression::If {
        condition: Box::new(condition),
        then: Box::new(then),
    }
}

pub fn if_else(condition: Expression, then: Expression, otherwise: Expression) -> Expression {
    Expression::IfElse {
        condition: Box::new(condition),
        then: Box::new(then),
        otherwise: Box::new(otherwise),
    }
}

pub fn for_each(item: Expression, collection: Expression, body: Vec<Expression>) -> Expression {
    Expression::ForEach {
        item: Box::new(item),
        collection: Box::new(collection),
        body,
    }
}

pub fn compound(statements: Vec<Expression>) -> Expression {
    Expression::Compound(statements)
}

pub fn comment(text: impl Into<String>) -> Expression {
    Expression::Comment(text.into())
}

pub fn to_json(expr: Expression) -> Expression {
    Expression::ToJson(Box::new(expr))
}

pub fn not(expr: Expression) -> Expression {
    Expression::Not(Box::new(expr))
}

pub fn and(expressions: Vec<Expression>) -> Expression {
    Expression::And(expressions)
}

pub fn equals(left: Expression, right: Expression) -> Expression {
    Expression::Equals(Box::new(left), Box::new(right))
}

pub fn is_null_or_empty(expr: Expression) -> Expression {
    Expression::IsNullOrEmpty(Box::new(expr))
}
