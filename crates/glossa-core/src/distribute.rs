use glossa_types::ExamplePair;

/// Assign a flat example list to `meaning_count` ordered buckets.
///
/// Examples carrying a valid 1-based `meaning_index` go straight into their
/// bucket; the rest are spread evenly across buckets in input order. The two
/// passes are exclusive with the full fallback below: either the
/// indexed+unindexed total is distributed, or (when nothing landed anywhere)
/// the entire original list is — never both.
pub fn distribute_examples(examples: &[ExamplePair], meaning_count: usize) -> Vec<Vec<ExamplePair>> {
    let mut buckets: Vec<Vec<ExamplePair>> = vec![Vec::new(); meaning_count];
    if meaning_count == 0 || examples.is_empty() {
        return buckets;
    }

    let mut unindexed: Vec<&ExamplePair> = Vec::new();
    for example in examples {
        match example.meaning_index {
            Some(index) if (1..=meaning_count as u32).contains(&index) => {
                buckets[(index - 1) as usize].push(example.clone());
            }
            _ => unindexed.push(example),
        }
    }

    fill_sequentially(&mut buckets, &unindexed);

    if buckets.iter().all(Vec::is_empty) {
        // nothing landed: spread the original list instead, so no example is
        // silently dropped
        let all: Vec<&ExamplePair> = examples.iter().collect();
        fill_sequentially(&mut buckets, &all);
    }

    buckets
}

/// Fill buckets in order, moving on once a bucket has taken its quota of
/// `ceil(len / buckets)` examples from this pass.
fn fill_sequentially(buckets: &mut [Vec<ExamplePair>], examples: &[&ExamplePair]) {
    if examples.is_empty() {
        return;
    }

    let quota = examples.len().div_ceil(buckets.len());
    let mut bucket = 0;
    let mut taken = 0;

    for example in examples {
        if taken == quota && bucket + 1 < buckets.len() {
            bucket += 1;
            taken = 0;
        }
        buckets[bucket].push((*example).clone());
        taken += 1;
    }
}
