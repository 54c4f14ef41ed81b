use super::*;


const WORDS: ConvertOptions = ConvertOptions {
    use_word_mapping: true,
};
const RULES_ONLY: ConvertOptions = ConvertOptions {
    use_word_mapping: false,
};
