use burn::{
    nn::{loss::CrossEntropyLossConfig, Embedding, EmbeddingConfig, Initializer, Linear, LinearConfig},
    prelude::*,
    tensor::activation::softmax,
};

// ─── Recurrent encoder ────────────────────────────────────────────────────────
// Single-layer Elman RNN:
//   h_t = tanh(W_ih · x_t + b_ih + W_hh · h_{t-1} + b_hh),  h_0 = 0
// Only the final hidden state leaves the encoder.
#[derive(Config, Debug)]
pub struct RnnEncoderConfig {
    pub d_input:  usize,
    pub d_hidden: usize,
}

impl RnnEncoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> RnnEncoder<B> {
        // U(-1/√hidden, 1/√hidden), the usual tanh-RNN initialisation
        let bound = 1.0 / (self.d_hidden as f64).sqrt();
        let initializer = Initializer::Uniform { min: -bound, max: bound };

        let input_to_hidden = LinearConfig::new(self.d_input, self.d_hidden)
            .with_initializer(initializer.clone())
            .init(device);
        let hidden_to_hidden = LinearConfig::new(self.d_hidden, self.d_hidden)
            .with_initializer(initializer)
            .init(device);

        RnnEncoder { input_to_hidden, hidden_to_hidden, d_hidden: self.d_hidden }
    }
}

#[derive(Module, Debug)]
pub struct RnnEncoder<B: Backend> {
    pub input_to_hidden:  Linear<B>,
    pub hidden_to_hidden: Linear<B>,
    pub d_hidden:         usize,
}

impl<B: Backend> RnnEncoder<B> {
    /// x: [batch, seq_len, d_input] → final hidden state [batch, d_hidden]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch_size, seq_len, d_input] = x.dims();
        let mut hidden = Tensor::<B, 2>::zeros([batch_size, self.d_hidden], &x.device());

        for t in 0..seq_len {
            let x_t = x
                .clone()
                .slice([0..batch_size, t..t + 1, 0..d_input])
                .reshape([batch_size, d_input]);
            hidden = (self.input_to_hidden.forward(x_t)
                + self.hidden_to_hidden.forward(hidden))
            .tanh();
        }

        hidden
    }
}

// ─── Classifier ───────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct CharClassifierConfig {
    pub vocab_size: usize,
    #[config(default = 20)]
    pub char_dim: usize,
    #[config(default = 25)]
    pub hidden_size: usize,
    #[config(default = 4)]
    pub class_num: usize,
}

impl CharClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> CharClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.char_dim).init(device);
        let rnn       = RnnEncoderConfig::new(self.char_dim, self.hidden_size).init(device);
        let classify  = LinearConfig::new(self.hidden_size, self.class_num).init(device);
        CharClassifier { embedding, rnn, classify }
    }
}

/// embedding → RNN (last hidden state) → linear → softmax
#[derive(Module, Debug)]
pub struct CharClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub rnn:       RnnEncoder<B>,
    pub classify:  Linear<B>,
}

impl<B: Backend> CharClassifier<B> {
    /// inputs: [batch, seq_len] → class probabilities [batch, class_num]
    pub fn forward(&self, inputs: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x      = self.embedding.forward(inputs); // [batch, seq_len, char_dim]
        let hidden = self.rnn.forward(x);            // [batch, hidden_size]
        let logits = self.classify.forward(hidden);  // [batch, class_num]
        softmax(logits, 1)
    }

    /// Mean cross-entropy against one-hot `labels` [batch, class_num].
    ///
    /// The loss is taken on the softmax output, not on the logits,
    /// so the probabilities go through a second log-softmax inside
    /// the cross-entropy. Trained weights depend on this exact
    /// composition.
    pub fn forward_loss(&self, inputs: Tensor<B, 2, Int>, labels: Tensor<B, 2>) -> Tensor<B, 1> {
        let probs   = self.forward(inputs);
        let targets = labels.argmax(1).squeeze::<1>(1);
        let ce = CrossEntropyLossConfig::new().init(&probs.device());
        ce.forward(probs, targets)
    }

    /// Shapes of the four weight matrices, by parameter name.
    /// `load_record` swaps tensors in without checking them, so
    /// callers compare these before and after loading.
    pub fn weight_shapes(&self) -> [(&'static str, [usize; 2]); 4] {
        [
            ("embedding.weight",            self.embedding.weight.val().dims()),
            ("rnn.input_to_hidden.weight",  self.rnn.input_to_hidden.weight.val().dims()),
            ("rnn.hidden_to_hidden.weight", self.rnn.hidden_to_hidden.weight.val().dims()),
            ("classify.weight",             self.classify.weight.val().dims()),
        ]
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::{
        backend::{Autodiff, NdArray},
        module::AutodiffModule,
        optim::{AdamConfig, GradientsParams, Optimizer},
        tensor::{activation::log_softmax, TensorData},
    };

    type TestBackend     = NdArray;
    type TestAutodiff    = Autodiff<NdArray>;

    fn ids<B: Backend>(rows: &[[i32; 6]]) -> Tensor<B, 2, Int> {
        let flat: Vec<i32> = rows.iter().flatten().copied().collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &Default::default())
            .reshape([rows.len(), 6])
    }

    #[test]
    fn test_output_is_a_distribution() {
        let model: CharClassifier<TestBackend> =
            CharClassifierConfig::new(27).init(&Default::default());
        let probs = model.forward(ids(&[[0, 1, 2, 3, 4, 5], [26, 26, 26, 26, 26, 26]]));
        assert_eq!(probs.dims(), [2, 4]);

        let row_sums: Vec<f32> = probs.clone().sum_dim(1).into_data().to_vec().unwrap();
        for s in row_sums {
            assert!((s - 1.0).abs() < 1e-5);
        }
        let values: Vec<f32> = probs.into_data().to_vec().unwrap();
        assert!(values.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_single_sample_batch() {
        let model: CharClassifier<TestBackend> =
            CharClassifierConfig::new(27).init(&Default::default());
        assert_eq!(model.forward(ids(&[[7, 7, 7, 7, 7, 7]])).dims(), [1, 4]);
    }

    #[test]
    fn test_rnn_returns_last_hidden_state() {
        let device = Default::default();
        let rnn: RnnEncoder<TestBackend> = RnnEncoderConfig::new(3, 5).init(&device);
        let x = Tensor::<TestBackend, 3>::ones([2, 4, 3], &device);
        let h = rnn.forward(x);
        assert_eq!(h.dims(), [2, 5]);

        // tanh keeps every component strictly inside (-1, 1)
        let values: Vec<f32> = h.into_data().to_vec().unwrap();
        assert!(values.iter().all(|v| v.abs() < 1.0));
    }

    #[test]
    fn test_loss_is_cross_entropy_of_probabilities() {
        let model: CharClassifier<TestBackend> =
            CharClassifierConfig::new(27).init(&Default::default());
        let inputs = || ids(&[[0, 1, 2, 3, 4, 5], [11, 12, 13, 20, 21, 22]]);
        let labels = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![0.0f32, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0], [2, 4]),
            &Default::default(),
        );

        // −mean_b log_softmax(softmax(logits))[b, target_b]
        let log_probs: Vec<f32> = log_softmax(model.forward(inputs()), 1)
            .into_data().to_vec().unwrap();
        let expected = -(log_probs[1] + log_probs[4 + 2]) / 2.0;

        let loss: f32 = model.forward_loss(inputs(), labels).into_scalar();
        assert!((loss - expected).abs() < 1e-5);
    }

    #[test]
    fn test_weight_shapes_follow_config() {
        let model: CharClassifier<TestBackend> = CharClassifierConfig::new(27)
            .with_char_dim(8)
            .with_hidden_size(5)
            .with_class_num(6)
            .init(&Default::default());
        assert_eq!(
            model.weight_shapes().map(|(_, dims)| dims),
            [[27, 8], [8, 5], [5, 5], [5, 6]]
        );
    }

    #[test]
    fn test_loss_is_bounded_by_double_softmax() {
        // On softmax output the cross-entropy can never go below
        // −log(e / (e + 3)) ≈ 0.7437 for 4 classes.
        let model: CharClassifier<TestBackend> =
            CharClassifierConfig::new(27).init(&Default::default());
        let labels = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![0.0f32, 1.0, 0.0, 0.0], [1, 4]),
            &Default::default(),
        );
        let loss: f32 = model
            .forward_loss(ids(&[[0, 0, 0, 0, 0, 0]]), labels)
            .into_scalar();
        assert!(loss.is_finite());
        assert!(loss > 0.74);
    }

    #[test]
    fn test_adam_step_changes_parameters() {
        let device = Default::default();
        let model: CharClassifier<TestAutodiff> = CharClassifierConfig::new(27).init(&device);
        let inputs = ids::<TestAutodiff>(&[[0, 1, 2, 3, 4, 5]]);
        let labels = Tensor::<TestAutodiff, 2>::from_data(
            TensorData::new(vec![0.0f32, 1.0, 0.0, 0.0], [1, 4]),
            &device,
        );

        let before: Vec<f32> = model.valid().forward(ids(&[[0, 1, 2, 3, 4, 5]]))
            .into_data().to_vec().unwrap();

        let mut optim = AdamConfig::new().init();
        let loss  = model.forward_loss(inputs, labels);
        let grads = GradientsParams::from_grads(loss.backward(), &model);
        let model = optim.step(0.005, model, grads);

        let after: Vec<f32> = model.valid().forward(ids(&[[0, 1, 2, 3, 4, 5]]))
            .into_data().to_vec().unwrap();
        assert_ne!(before, after);
        // one step towards class 1 raises its probability
        assert!(after[1] > before[1]);
    }
}
