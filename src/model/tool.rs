//! Catalog of analysis tools offered by the tool picker

/// Analysis tools known to the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisTool {
    EscalationAnalysis,
    VulnerabilityScan,
    CodeSimilarity,
    BehaviorAnalysis,
}

impl AnalysisTool {
    /// Catalog in display order
    pub const ALL: [AnalysisTool; 4] = [
        AnalysisTool::EscalationAnalysis,
        AnalysisTool::VulnerabilityScan,
        AnalysisTool::CodeSimilarity,
        AnalysisTool::BehaviorAnalysis,
    ];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            AnalysisTool::EscalationAnalysis => "escalation-analysis",
            AnalysisTool::VulnerabilityScan => "vulnerability-scan",
            AnalysisTool::CodeSimilarity => "code-similarity",
            AnalysisTool::BehaviorAnalysis => "behavior-analysis",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisTool::EscalationAnalysis => "Escalation Analysis",
            AnalysisTool::VulnerabilityScan => "Vulnerability Scanner",
            AnalysisTool::CodeSimilarity => "Code Similarity",
            AnalysisTool::BehaviorAnalysis => "Behavior Analysis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnalysisTool::EscalationAnalysis => {
                "Analyze code for potential privilege escalation patterns"
            }
            AnalysisTool::VulnerabilityScan => "Scan code for common security vulnerabilities",
            AnalysisTool::CodeSimilarity => "Find similar code patterns across your codebase",
            AnalysisTool::BehaviorAnalysis => "Analyze runtime behavior patterns",
        }
    }

    /// Only available tools can be selected; the rest are placeholders.
    pub fn is_available(&self) -> bool {
        matches!(self, AnalysisTool::EscalationAnalysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_escalation_analysis_is_available() {
        let available: Vec<_> = AnalysisTool::ALL
            .iter()
            .filter(|t| t.is_available())
            .collect();
        assert_eq!(available, vec![&AnalysisTool::EscalationAnalysis]);
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in AnalysisTool::ALL.iter().enumerate() {
            for b in &AnalysisTool::ALL[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }
}
