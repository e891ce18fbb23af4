#[macro_use]
extern crate criterion;

use criterion::{black_box, BatchSize, Criterion};

use policy_tree::{Handle, Node, Shared, StoragePolicy, Unique};

use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};

trait NodeCreator: Sized {
    type ValType;
    fn val(&self) -> Self::ValType;
    fn next_child(&mut self, rng: &mut impl Rng) -> Option<Self>;
}

// Creates a tree where at each level, every node has the same number of children
struct SimpleNodeCreator<'a> {
    val: u32,
    depth: usize,
    num_children_created: usize,
    children_per_node_per_level: &'a [usize],
}

impl<'a> NodeCreator for SimpleNodeCreator<'a> {
    type ValType = u32;

    fn val(&self) -> Self::ValType {
        self.val
    }

    fn next_child(&mut self, rng: &mut impl Rng) -> Option<Self> {
        self.children_per_node_per_level.get(self.depth).and_then(|max_children| {
            if self.num_children_created < *max_children {
                self.num_children_created += 1;
                Some(SimpleNodeCreator {
                    val: rng.next_u32(),
                    depth: self.depth + 1,
                    num_children_created: 0,
                    children_per_node_per_level: self.children_per_node_per_level,
                })
            } else {
                None
            }
        })
    }
}

fn make_wide_flat_tree() -> SimpleNodeCreator<'static> {
    SimpleNodeCreator {
        val: 1,
        depth: 0,
        num_children_created: 0,
        children_per_node_per_level: &[1000],
    }
}

fn make_binary_tree() -> SimpleNodeCreator<'static> {
    SimpleNodeCreator {
        val: 1,
        depth: 0,
        num_children_created: 0,
        children_per_node_per_level: &[2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    }
}

// Creates a tree where each node gets children with a per-level probability
struct RandomNodeCreator<'a> {
    val: u32,
    depth: usize,
    child_chance_per_level: &'a [f64],
}

impl<'a> NodeCreator for RandomNodeCreator<'a> {
    type ValType = u32;

    fn val(&self) -> Self::ValType {
        self.val
    }

    fn next_child(&mut self, rng: &mut impl Rng) -> Option<Self> {
        self.child_chance_per_level.get(self.depth).and_then(|child_chance| {
            let range = Uniform::new(0.0f64, 1.0);
            if range.sample(rng) < *child_chance {
                Some(RandomNodeCreator {
                    val: rng.next_u32(),
                    depth: self.depth + 1,
                    child_chance_per_level: self.child_chance_per_level,
                })
            } else {
                None
            }
        })
    }
}

fn make_wide_random_tree() -> RandomNodeCreator<'static> {
    RandomNodeCreator {
        val: 1,
        depth: 0,
        child_chance_per_level: &[0.99, 0.9],
    }
}

fn make_deep_random_tree() -> RandomNodeCreator<'static> {
    RandomNodeCreator {
        val: 1,
        depth: 0,
        child_chance_per_level: &[2. / 3., 2. / 3., 2. / 3., 2. / 3., 2. / 3., 2. / 3., 2. / 3., 2. / 3., 2. / 3., 2. / 3.],
    }
}

fn create_tree<C: NodeCreator, P: StoragePolicy>(creator: &mut C, rng: &mut impl Rng) -> Handle<C::ValType, P> {
    let mut children = Vec::new();
    while let Some(mut child_creator) = creator.next_child(rng) {
        children.push(create_tree(&mut child_creator, rng));
    }
    Node::create(creator.val(), children)
}

fn create_chain<P: StoragePolicy>(len: u32) -> Handle<u32, P> {
    let mut handle = Node::leaf(0);
    for val in 1..len {
        handle = Node::create(val, vec![handle]);
    }
    handle
}

fn make_rng() -> impl Rng {
    rand_xorshift::XorShiftRng::seed_from_u64(1234)
}

fn sum<'t, P: StoragePolicy>(nodes: impl Iterator<Item = &'t Node<u32, P>>) -> u64 {
    nodes.map(|node| u64::from(*node.value())).sum()
}

fn benchmark_policy<C: NodeCreator<ValType = u32> + 'static, P: StoragePolicy>(
    c: &mut Criterion,
    creator: fn() -> C,
    type_name: &'static str,
    policy_name: &'static str,
) {
    c.bench_function(&format!("make_{}_{}", type_name, policy_name), move |b| {
        b.iter(|| create_tree::<C, P>(&mut creator(), &mut black_box(make_rng())))
    });

    let tree = create_tree::<C, P>(&mut creator(), &mut make_rng());
    c.bench_function(&format!("bfs_{}_{}", type_name, policy_name), move |b| {
        let root = tree.get().unwrap();
        b.iter(|| sum(black_box(root).breadth_first()))
    });
    let tree = create_tree::<C, P>(&mut creator(), &mut make_rng());
    c.bench_function(&format!("dfs_{}_{}", type_name, policy_name), move |b| {
        let root = tree.get().unwrap();
        b.iter(|| sum(black_box(root).depth_first()))
    });
    let tree = create_tree::<C, P>(&mut creator(), &mut make_rng());
    c.bench_function(&format!("inorder_{}_{}", type_name, policy_name), move |b| {
        let root = tree.get().unwrap();
        b.iter(|| sum(black_box(root).in_order()))
    });

    c.bench_function(&format!("teardown_{}_{}", type_name, policy_name), move |b| {
        b.iter_batched(
            || create_tree::<C, P>(&mut creator(), &mut make_rng()),
            |tree| tree.destroy(),
            BatchSize::LargeInput,
        )
    });
}

fn benchmark_tree_type<C: NodeCreator<ValType = u32> + 'static>(c: &mut Criterion, creator: fn() -> C, type_name: &'static str) {
    benchmark_policy::<C, Unique>(c, creator, type_name, "unique");
    benchmark_policy::<C, Shared>(c, creator, type_name, "shared");
}

fn benchmark_chain<P: StoragePolicy>(c: &mut Criterion, policy_name: &'static str) {
    c.bench_function(&format!("teardown_chain_{}", policy_name), move |b| {
        b.iter_batched(|| create_chain::<P>(1000), |tree| tree.destroy(), BatchSize::LargeInput)
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    benchmark_tree_type(c, make_wide_flat_tree, "flat");
    benchmark_tree_type(c, make_binary_tree, "binary");
    benchmark_tree_type(c, make_wide_random_tree, "wide_random");
    benchmark_tree_type(c, make_deep_random_tree, "deep_random");
    benchmark_chain::<Unique>(c, "unique");
    benchmark_chain::<Shared>(c, "shared");
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
