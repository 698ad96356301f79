//! Fixed instruction sent for every criterion.
//!
//! The reply vocabulary (`양호` / `주의` / `위험`) is what the classifier
//! looks for, so the two must change together.

/// Labels of the four lines the reply is asked to contain.
pub const REPLY_FIELDS: [&str; 4] = ["등급", "핵심진단", "문제점", "제안"];

/// Render the diagnosis instruction for one criterion.
pub fn build_diagnosis_prompt(goal: &str, criterion: &str, sub_items: &[String]) -> String {
    let items = sub_items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "당신은 논리 구조 진단 전문가입니다.

[분석 대상]
- 목표/상위개념: {goal} -> {criterion}
- 하위요소들: [{items}]

[요청사항]
위 구조가 'MECE(누락/중복 없음)'하고 '논리적'인지 판단하여 아래 형식으로 짧게 답변하세요.
서술형으로 길게 쓰지 마세요.

[답변 형식]
{grade}: [양호/주의/위험] 중 하나
{summary}: (15자 이내로 짧게 요약)
{problem}: (발견된 경우만 1줄 작성, 없으면 '없음')
{suggestion}: (수정이 필요하다면 1줄 제안)
",
        grade = REPLY_FIELDS[0],
        summary = REPLY_FIELDS[1],
        problem = REPLY_FIELDS[2],
        suggestion = REPLY_FIELDS[3],
    )
}
