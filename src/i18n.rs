use serde::{Deserialize, Serialize};

/// 目标语言类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ru")]
    Russian,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::Japanese => write!(f, "ja"),
            TargetLanguage::Korean => write!(f, "ko"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::French => write!(f, "fr"),
            TargetLanguage::Russian => write!(f, "ru"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "en" | "english" | "英文" => Ok(TargetLanguage::English),
            "ja" | "japanese" | "日本語" | "日文" => Ok(TargetLanguage::Japanese),
            "ko" | "korean" | "한국어" | "韩文" => Ok(TargetLanguage::Korean),
            "de" | "german" | "deutsch" | "德文" => Ok(TargetLanguage::German),
            "fr" | "french" | "français" | "法文" => Ok(TargetLanguage::French),
            "ru" | "russian" | "русский" | "俄文" => Ok(TargetLanguage::Russian),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "中文",
            TargetLanguage::English => "English",
            TargetLanguage::Japanese => "日本語",
            TargetLanguage::Korean => "한국어",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::French => "Français",
            TargetLanguage::Russian => "Русский",
        }
    }

    /// 获取语言的提示词指令
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "请使用中文撰写调研摘要和思维导图节点文本，确保语言表达准确、专业、易于理解。",
            TargetLanguage::English => {
                "Please write the research summary and mindmap node labels in English, ensuring accurate, professional, and easy-to-understand language."
            }
            TargetLanguage::Japanese => {
                "調査サマリーとマインドマップのノードラベルは日本語で作成してください。正確で専門的で理解しやすい表現を心がけてください。"
            }
            TargetLanguage::Korean => {
                "조사 요약과 마인드맵 노드 라벨은 한국어로 작성해 주세요. 정확하고 전문적이며 이해하기 쉬운 표현을 사용해 주세요."
            }
            TargetLanguage::German => {
                "Bitte verfassen Sie die Rechercheübersicht und die Mindmap-Knoten auf Deutsch, präzise, professionell und leicht verständlich."
            }
            TargetLanguage::French => {
                "Veuillez rédiger la synthèse de recherche et les libellés de la carte mentale en français, de manière précise, professionnelle et facile à comprendre."
            }
            TargetLanguage::Russian => {
                "Пожалуйста, составьте исследовательское резюме и подписи узлов интеллект-карты на русском языке, точно, профессионально и понятно."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_language_from_str() {
        assert_eq!("zh".parse::<TargetLanguage>().unwrap(), TargetLanguage::Chinese);
        assert_eq!("English".parse::<TargetLanguage>().unwrap(), TargetLanguage::English);
        assert_eq!("ja".parse::<TargetLanguage>().unwrap(), TargetLanguage::Japanese);
        assert!("martian".parse::<TargetLanguage>().is_err());
    }

    #[test]
    fn test_target_language_default_is_english() {
        assert_eq!(TargetLanguage::default(), TargetLanguage::English);
    }

    #[test]
    fn test_display_round_trip() {
        for lang in [
            TargetLanguage::Chinese,
            TargetLanguage::English,
            TargetLanguage::Japanese,
            TargetLanguage::Korean,
            TargetLanguage::German,
            TargetLanguage::French,
            TargetLanguage::Russian,
        ] {
            let code = lang.to_string();
            assert_eq!(code.parse::<TargetLanguage>().unwrap(), lang);
        }
    }
}
