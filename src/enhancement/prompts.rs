//! Prompt templates, one per enhancement field

use super::fields::EnhancementField;

const PHONETIC: &str = "给出 {word} 的国际音标（IPA）。\n仅输出 IPA，使用斜杠包裹，如 /.../。\n\n请严格按以下JSON格式返回：\n{\n  \"phonetic\": \"/.../\"\n}";

const PART_OF_SPEECH: &str = "给出 {word} 的主要词性缩写。\n仅输出缩写，如 n.、adj.、v. 等。\n\n请严格按以下JSON格式返回：\n{\n  \"partOfSpeech\": \"n.\"\n}";

const DEFINITION: &str = "用一句话简洁解释 {word} 的核心含义，适合记忆，控制在 15 字内。\n只输出中文，不加引号或额外说明。\n\n请严格按以下JSON格式返回：\n{\n  \"definition\": \"一句话定义（≤15字）\"\n}";

const COLLOCATIONS: &str = "列出 {word} 的 3 个高频固定搭配。\n每项以“英文：中文解释”的形式输出，每项单独占一行，不返回额外说明。\n\n示例格式：\n英文短语1：中文解释1\n英文短语2：中文解释2\n英文短语3：中文解释3";

const EXAMPLE: &str = "使用最基础的 2500 单词与 {word} 造一个 12 词以内的句子，并翻译成中文。\n英文句子与中文翻译写在同一行，用 —— 分隔。\n\n示例格式：\n英文句子 —— 中文翻译";

const CHINESE_MEANING: &str = "用 ≤4 字中文简洁解释 {word}。\n仅输出 1 个常用词，不加引号或标点。\n\n请严格按以下JSON格式返回：\n{\n  \"chineseMeaning\": \"中文释义（≤4字）\"\n}";

const MEMORY_TIP: &str = "为 {word} 设计 1 个词根/词源记忆法，≤20 字。\n仅输出中文短句，不加引号。\n\n请严格按以下JSON格式返回：\n{\n  \"memoryTip\": \"记忆要点（≤20字）\"\n}";

const ASSOCIATION: &str = "为 {word} 设计 1 个形象联想，可加 1 个 emoji，≤10 字。\n仅输出短语，不加引号。\n\n请严格按以下JSON格式返回：\n{\n  \"association\": \"联想短语（≤10字）\"\n}";

const SYNONYMS: &str = "列出单词 {word} 的 2 个最常用近义词，并用简单例句区分它们的用法差异。\n\n请严格按以下JSON格式返回：\n{\n  \"synonyms\": [\n    {\"word\": \"近义词\", \"example\": \"突出细微差别的例句\", \"difference\": \"与原词的区别（≤15字）\"}\n  ]\n}";

const ANTONYMS: &str = "给出单词 {word} 的主要反义词并造句说明。\n\n请严格按以下JSON格式返回：\n{\n  \"antonyms\": [\n    {\"word\": \"反义词\", \"example\": \"同时包含原词和反义词的对比例句\"}\n  ]\n}";

/// The raw template for `field`, with a `{word}` placeholder
pub fn template(field: EnhancementField) -> &'static str {
    match field {
        EnhancementField::Phonetic => PHONETIC,
        EnhancementField::PartOfSpeech => PART_OF_SPEECH,
        EnhancementField::Definition => DEFINITION,
        EnhancementField::Collocations => COLLOCATIONS,
        EnhancementField::Example => EXAMPLE,
        EnhancementField::ChineseMeaning => CHINESE_MEANING,
        EnhancementField::MemoryTip => MEMORY_TIP,
        EnhancementField::Association => ASSOCIATION,
        EnhancementField::Synonyms => SYNONYMS,
        EnhancementField::Antonyms => ANTONYMS,
    }
}

pub fn render(field: EnhancementField, word: &str) -> String {
    template(field).replace("{word}", word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_template() {
        for field in EnhancementField::ALL {
            assert!(template(field).contains("{word}"), "{} template has no placeholder", field);
        }
    }

    #[test]
    fn test_render_substitutes_word() {
        let prompt = render(EnhancementField::Definition, "ephemeral");
        assert!(prompt.contains("ephemeral"));
        assert!(!prompt.contains("{word}"));
        assert!(prompt.contains("\"definition\""));
    }
}
