// src/analysis/prompt.rs
//! Fixed six-section outline for the idea analysis prompt.
//!
//! Rendering downstream assumes these headings come back, so the outline is
//! static text with the idea inserted exactly once.

use crate::types::IdeaAnalysisRequest;

const PROMPT_INTRO: &str = "다음 창업 아이디어에 대해 상세한 분석을 제공해주세요: ";

pub const SECTION_TITLES: [&str; 6] = [
    "## 1. 시장 동향 분석",
    "## 2. 경쟁 환경 분석",
    "## 3. 성장 전망",
    "## 4. 성공 사례 분석",
    "## 5. 실패 사례 분석",
    "## 6. 핵심 성공 요인 종합",
];

const ANALYSIS_OUTLINE: &str = r#"분석은 다음 구조를 따라야 합니다:

## 1. 시장 동향 분석
- 해당 산업의 최근 3~5년간 연도별 성장률을 수치로 제시해 주세요
- 시장 규모와 주요 트렌드, 변화를 이끄는 요인을 설명해 주세요
- 핵심 목표 고객층과 그들의 니즈를 정리해 주세요

## 2. 경쟁 환경 분석
- 상위 3개 경쟁사를 시장 점유율 수치와 함께 제시해 주세요
- 각 경쟁사의 강점과 약점을 비교해 주세요
- 진입 장벽과 차별화 기회를 분석해 주세요

## 3. 성장 전망
- 향후 3~5년간의 시장 성장률을 예측해 주세요
- 성장을 이끌 핵심 동인을 설명해 주세요
- 예상되는 위험 요인과 규제 이슈를 제시해 주세요

## 4. 성공 사례 분석
- 유사한 아이템으로 성공한 기업 2~3곳을 소개해 주세요
- 각 기업의 비즈니스 모델과 성공 요인을 구체적으로 분석해 주세요
- 본 아이디어에 적용할 수 있는 시사점을 정리해 주세요

## 5. 실패 사례 분석
- 유사한 아이템으로 실패한 기업 2~3곳을 소개해 주세요
- 실패의 주요 원인을 분석해 주세요
- 같은 실수를 피하기 위한 교훈을 정리해 주세요

## 6. 핵심 성공 요인 종합
- 위 분석을 바탕으로 핵심 성공 요인 3~5가지를 도출해 주세요
- 초기 실행 전략과 우선순위를 제안해 주세요
- 단계별 주요 지표(KPI)를 제안해 주세요

각 섹션에 대해 상세하고 구체적인 정보를 제공해 주세요."#;

pub fn build_analysis_prompt(request: &IdeaAnalysisRequest) -> String {
    format!(
        "{}{}\n\n{}",
        PROMPT_INTRO,
        request.idea_text(),
        ANALYSIS_OUTLINE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idea_is_inserted_once() {
        let request = IdeaAnalysisRequest::new("AI 기반 반려동물 건강 관리 앱").unwrap();
        let prompt = build_analysis_prompt(&request);
        assert_eq!(prompt.matches("AI 기반 반려동물 건강 관리 앱").count(), 1);
        assert!(prompt.starts_with(PROMPT_INTRO));
    }

    #[test]
    fn test_sections_appear_in_order() {
        let request = IdeaAnalysisRequest::new("무인 세탁소 프랜차이즈").unwrap();
        let prompt = build_analysis_prompt(&request);

        let mut last = 0;
        for title in SECTION_TITLES {
            let position = prompt
                .find(title)
                .unwrap_or_else(|| panic!("missing section: {}", title));
            assert!(position > last);
            last = position;
        }
    }

    #[test]
    fn test_required_sub_bullets_present() {
        let request = IdeaAnalysisRequest::new("x").unwrap();
        let prompt = build_analysis_prompt(&request);
        assert!(prompt.contains("3~5년간 연도별 성장률"));
        assert!(prompt.contains("상위 3개 경쟁사를 시장 점유율 수치와 함께"));
        assert!(prompt.trim_end().ends_with("상세하고 구체적인 정보를 제공해 주세요."));
    }

    #[test]
    fn test_braces_in_idea_are_kept_verbatim() {
        let request = IdeaAnalysisRequest::new("{idea} 템플릿 {}").unwrap();
        let prompt = build_analysis_prompt(&request);
        assert!(prompt.contains("{idea} 템플릿 {}"));
    }
}
