//! ツールチップ初期化
//!
//! 提供元（Bootstrap等）が登録されている場合のみ、対象要素ごとに生成する。
//! 生成したウィジェットは保持しない。

/// ツールチップの提供元
pub trait TooltipProvider {
    type Element;
    type Error;

    fn attach(&self, element: &Self::Element) -> Result<(), Self::Error>;
}

/// 初期化結果
#[derive(Debug)]
pub struct TooltipReport<E> {
    pub activated: usize,
    pub errors: Vec<E>,
}

/// 対象要素すべてにツールチップを付ける
///
/// 提供元が無ければ `None`（何もしない）。1要素の失敗で残りを止めない。
pub fn activate_tooltips<P, I>(provider: Option<&P>, triggers: I) -> Option<TooltipReport<P::Error>>
where
    P: TooltipProvider,
    I: IntoIterator<Item = P::Element>,
{
    let provider = provider?;
    let mut report = TooltipReport {
        activated: 0,
        errors: Vec::new(),
    };

    for element in triggers {
        match provider.attach(&element) {
            Ok(()) => report.activated += 1,
            Err(e) => report.errors.push(e),
        }
    }

    Some(report)
}
