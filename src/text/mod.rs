// Text processing: normalization, lemmatization seam and n-gram statistics.

pub mod lemma;
pub mod ngrams;
pub mod normalize;
