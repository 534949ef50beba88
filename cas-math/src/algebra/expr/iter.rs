use super::Expr;

/// Iterator over every node of an expression tree in left-to-right post-order, so each node is
/// yielded after all of its descendants.
///
/// Created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Nodes waiting to be yielded. The flag is set once the node's children have been pushed
    /// above it.
    pending: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    pub fn new(expr: &'a Expr) -> Self {
        Self { pending: vec![(expr, false)] }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.pending.pop()?;
            if expanded {
                return Some(expr);
            }

            self.pending.push((expr, true));
            match expr {
                Expr::Primary(_) => {},
                Expr::Call(_, arg) => self.pending.push((&**arg, false)),
                Expr::Add(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Exp(lhs, rhs) => {
                    self.pending.push((&**rhs, false));
                    self.pending.push((&**lhs, false));
                },
            }
        }
    }
}
